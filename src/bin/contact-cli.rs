use clap::{Parser, Subcommand};
use contact_client::{ContactClient, ContactForm};
use contact_service::contact::{validate, SubmissionDraft};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "contact-cli")]
#[command(about = "Command line client for the contact service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health,
    /// Send a contact message
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
        /// Skip local validation and let the service decide
        #[arg(long)]
        no_validate: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = ContactClient::new(&cli.url);

    match cli.command {
        Commands::Health => print_json(&client.health().await?)?,
        Commands::Submit {
            name,
            email,
            subject,
            message,
            no_validate,
        } => {
            let form = ContactForm {
                name,
                email,
                subject,
                message,
            };

            if !no_validate {
                let draft = SubmissionDraft {
                    name: form.name.clone(),
                    email: form.email.clone(),
                    subject: form.subject.clone(),
                    message: form.message.clone(),
                };
                if let Err(errors) = validate(draft) {
                    eprintln!("Error: {}", errors);
                    std::process::exit(2);
                }
            }

            match client.submit(&form).await {
                Ok(response) => print_json(&response)?,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
