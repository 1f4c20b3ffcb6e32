// Bar loading and preparation. This is the collaborator side of the engine:
// it sorts and trims raw bars before a PriceSeries is built from them.
pub mod csv_parser;
pub mod market_data;
