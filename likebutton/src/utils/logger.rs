use colored::Colorize;

use crate::controller::{Activation, Settlement};
use crate::models::item_id::ItemId;

pub fn log_info(message: String) {
    println!("{}: {}", "Info".bright_blue(), message.blue());
}

pub fn log_fatal(message: String) {
    println!("{}: {}", "FATAL".bright_red().bold(), message.bright_red().bold());
}

/// One console line per activation outcome.
pub fn log_activation(item_id: &ItemId, activation: &Activation) {
    match activation {
        Activation::Settled(Settlement::Success(res)) => println!(
            "{}: item {} {} ({} likes)",
            "Success".bright_green(),
            item_id,
            (if res.liked { "liked" } else { "unliked" }).green(),
            res.count
        ),
        Activation::Settled(Settlement::Failure(e)) => {
            println!("{}: item {}: {}", "Error".bright_red().bold(), item_id, e.to_string().red())
        }
        Activation::Ignored(reason) => println!(
            "{}: item {} ignored: {}",
            "Warning".bright_yellow(),
            item_id,
            reason.to_string().yellow()
        ),
    }
}
