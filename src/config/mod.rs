//! Simulation configuration

pub mod settings;

pub use settings::{
    SimulationConfig, get_config_dir, get_config_file_path, load_config, load_config_from, save_config_to
};
