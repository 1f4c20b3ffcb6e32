// Data models exchanged between the indicator engine and its collaborators
// (market-data loaders on the input side, serializers/persistence on the output side).
pub mod models;
