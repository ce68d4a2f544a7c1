pub mod config;
pub mod model;

// Listing backends
pub mod client;

// Rendering records as text
pub mod feature;
pub mod format;

// Panes and the controller driving them
pub mod menu;
pub mod region;
