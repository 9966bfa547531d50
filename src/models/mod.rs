pub mod met_forecast;
