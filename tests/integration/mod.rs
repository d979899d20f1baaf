mod csv_to_charts;
