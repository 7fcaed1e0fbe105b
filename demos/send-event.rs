use std::env;
use std::process;

use sentry_store::{Client, Delivery, EventConfig};

fn main() {
    pretty_env_logger::init();

    let mut args = env::args().skip(1);
    let directive = match args.next() {
        Some(directive) => directive,
        None => {
            eprintln!("usage: send-event <directive> [message]");
            process::exit(2);
        }
    };
    let message = args.next().unwrap_or_default();

    let config: EventConfig = match directive.parse() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid directive: {}", err);
            process::exit(1);
        }
    };

    let client = match Client::with_default_transport() {
        Some(client) => client,
        None => {
            eprintln!("compiled without a transport");
            process::exit(1);
        }
    };

    match client.send(&config, &message) {
        Delivery::Sent { event_id } => println!("sent {}", event_id.simple()),
        other => {
            println!("not sent: {:?}", other);
            process::exit(1);
        }
    }
}
