pub mod files;
pub mod pomodoro_state;
pub mod store;

pub use files::{
    atomic_write, collection_file, config_file, ensure_data_dir, get_data_dir,
    init_data_dir_in, init_local_data_dir, log_file, read_file,
};
pub use pomodoro_state::{load_snapshot, save_snapshot, PomodoroSnapshot};
pub use store::{keys, Record, Store};
