pub mod compiled_module;
pub mod dependency_graph;
pub mod module_id;
pub mod module_record;
pub mod output_asset;
pub mod source;
pub mod source_joiner;
