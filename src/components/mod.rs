pub mod control_panel;
pub mod force_graph;
