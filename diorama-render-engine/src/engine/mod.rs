pub mod assets;
pub mod core;
pub mod loading;
pub mod orbit;
pub mod scene;
