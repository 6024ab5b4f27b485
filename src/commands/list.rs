//! Transport listing

use crate::transports;

/// Print the compiled-in transports
pub fn list_transports() {
    let transports = transports::available_transports();

    if transports.is_empty() {
        println!("No transports available (recompile with transport features enabled)");
        return;
    }

    println!("Available transports:");
    for t in &transports {
        print!("  {:12} - {}", t.name, t.description);
        if !t.aliases.is_empty() {
            print!(" (aliases: {})", t.aliases.join(", "));
        }
        println!();
    }
}
