mod queries;
mod snapshot;
mod type_store;
