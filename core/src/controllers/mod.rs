pub mod android_impl;
pub mod android_logic;
pub mod preload_impl;
pub mod process_impl;
pub mod process_logic;
