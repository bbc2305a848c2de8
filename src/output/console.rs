//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
  ______                     ___  ___     _
  | ___ \                    |  \/  |    | |
  | |_/ /____      _____ _ __| .  . | ___| |_ ___ _ __
  |  __/ _ \ \ /\ / / _ \ '__| |\/| |/ _ \ __/ _ \ '__|
  | | | (_) \ V  V /  __/ |  | |  | |  __/ ||  __/ |
  \_|  \___/ \_/\_/ \___|_|  \_|  |_/\___|\__\___|_|
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(channels: &[String], base_url: &str, data_dir: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Channels:  {}", channels.join(", "));
    println!("  Device:    {}", base_url);
    println!("  Directory: {}", data_dir);
    println!();
}
