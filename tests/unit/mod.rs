mod view_properties;
