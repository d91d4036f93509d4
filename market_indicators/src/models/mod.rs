pub mod bar;
pub mod frame;
pub mod price_series;
pub mod request_params;
