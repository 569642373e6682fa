#[path = "core/config_file.rs"]
mod config_file;
#[path = "core/design.rs"]
mod design;
#[path = "core/event_bus.rs"]
mod event_bus;
#[path = "core/geometry.rs"]
mod geometry;
