// Application layer - Item instances, the factory and the composition engine
pub mod click_sink;
pub mod console;
pub mod factory;
pub mod item;
pub mod items;
