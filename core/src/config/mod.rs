pub mod tool_settings;
