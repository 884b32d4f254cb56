pub mod settings;
pub mod spawner;
