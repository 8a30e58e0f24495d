//! Mindful CLI - Command-line client for the Mindful REST API

mod client;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::{ApiClient, MessageBody};
use colored::Colorize;
use serde::Deserialize;
use serde_json::{json, Value};
use tabled::{Table, Tabled};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "mindfulctl")]
#[command(about = "Mindful companion CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL
    #[arg(long, env = "MINDFUL_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Session token from `mindfulctl login`
    #[arg(long, env = "MINDFUL_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server health
    Health,

    /// Register a patient account
    RegisterPatient {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        age: i32,
    },

    /// Register a psychologist account
    RegisterPsychologist {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },

    /// Log in and print a session token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },

    /// Revoke the current session
    Logout,

    /// Show the logged-in account
    Me,

    /// Daily mood tracking (patients)
    #[command(subcommand)]
    Mood(MoodCommand),

    /// Journal entries
    #[command(subcommand)]
    Journal(JournalCommand),

    /// Patient management (psychologists)
    #[command(subcommand)]
    Patients(PatientsCommand),

    /// Appointments
    #[command(subcommand)]
    Appointments(AppointmentsCommand),
}

#[derive(Subcommand)]
enum MoodCommand {
    /// Submit today's mood (1-10)
    Submit { value: i32 },
    /// Show mood history
    History,
    /// Show today's mood
    Today,
}

#[derive(Subcommand)]
enum JournalCommand {
    /// List own entries
    List,
    /// Show one entry
    Show { id: i64 },
    /// Create an entry
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short = 'x', long)]
        text: String,
        #[arg(long)]
        tags: Option<String>,
    },
    /// Replace an entry's content
    Edit {
        id: i64,
        #[arg(short, long)]
        title: String,
        #[arg(short = 'x', long)]
        text: String,
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete an entry
    Delete { id: i64 },
    /// Share an entry with your psychologist
    Share { id: i64 },
    /// Stop sharing an entry
    Unshare { id: i64 },
    /// Entries shared with me (psychologists)
    Shared,
}

#[derive(Subcommand)]
enum PatientsCommand {
    /// Patients without a psychologist
    Unassigned,
    /// My patients
    Assigned,
    /// Take on a patient
    Assign { patient_id: i64 },
    /// Mood history of one of my patients
    Moods { patient_id: i64 },
}

#[derive(Subcommand)]
enum AppointmentsCommand {
    /// List appointments (psychologists: optionally filtered by status)
    List {
        #[arg(long)]
        status: Option<String>,
    },
    /// Book an appointment (psychologists), times as 2030-01-15T09:00:00
    Book {
        #[arg(long)]
        patient_id: i64,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Cancel an appointment
    Cancel { id: i64 },
    /// Mark an appointment completed (psychologists)
    Complete { id: i64 },
}

#[derive(Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct MoodRow {
    id: i64,
    date: String,
    value: i32,
}

#[derive(Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct JournalRow {
    id: i64,
    date: String,
    title: String,
    #[tabled(display_with = "display_option")]
    tags: Option<String>,
    #[tabled(rename = "shared")]
    allow_psychologist: bool,
}

#[derive(Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct PatientRow {
    id: i64,
    username: String,
    first_name: String,
    last_name: String,
    age: i32,
}

#[derive(Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct AppointmentRow {
    id: i64,
    start_time: String,
    end_time: String,
    status: String,
    patient_first_name: String,
    patient_last_name: String,
    psychologist_last_name: String,
}

fn display_option(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn print_message(body: MessageBody) {
    println!("{}", format!("✓ {}", body.message).green().bold());
}

fn print_table<T: Tabled>(rows: Vec<T>, empty: &str) {
    if rows.is_empty() {
        println!("{}", empty.yellow());
    } else {
        println!("{}", Table::new(rows));
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let api = ApiClient::new(&cli.api_url, cli.token.clone());

    match cli.command {
        Commands::Health => {
            let health: Value = api.get("/health").await?;
            println!("{}", "Server Status".cyan().bold());
            print_json(&health)?;
        }

        Commands::RegisterPatient {
            username,
            password,
            first_name,
            last_name,
            age,
        } => {
            let body = json!({
                "username": username,
                "password": password,
                "firstName": first_name,
                "lastName": last_name,
                "age": age,
            });
            print_message(api.post("/auth/register/patient", Some(body)).await?);
        }

        Commands::RegisterPsychologist {
            username,
            password,
            first_name,
            last_name,
        } => {
            let body = json!({
                "username": username,
                "password": password,
                "firstName": first_name,
                "lastName": last_name,
            });
            print_message(api.post("/auth/register/psychologist", Some(body)).await?);
        }

        Commands::Login { username, password } => {
            let response: Value = api
                .post(
                    "/auth/login",
                    Some(json!({ "username": username, "password": password })),
                )
                .await?;

            let token = response
                .get("accessToken")
                .and_then(Value::as_str)
                .map(|t| t.trim_start_matches("Bearer "))
                .context("Login response has no access token")?;
            let role = response.get("role").and_then(Value::as_str).unwrap_or("?");

            println!("{}", format!("✓ Logged in as {} ({})", username, role).green().bold());
            println!();
            println!("export MINDFUL_TOKEN={}", token);
        }

        Commands::Logout => {
            print_message(api.post("/auth/logout", None).await?);
        }

        Commands::Me => {
            let me: Value = api.get("/auth/me").await?;
            print_json(&me)?;
        }

        Commands::Mood(cmd) => match cmd {
            MoodCommand::Submit { value } => {
                print_message(api.post("/mood", Some(json!({ "value": value }))).await?);
            }
            MoodCommand::History => {
                let rows: Vec<MoodRow> = api.get("/mood").await?;
                print_table(rows, "No moods recorded yet");
            }
            MoodCommand::Today => {
                let mood: MoodRow = api.get("/mood/today").await?;
                print_table(vec![mood], "");
            }
        },

        Commands::Journal(cmd) => match cmd {
            JournalCommand::List => {
                let rows: Vec<JournalRow> = api.get("/journal").await?;
                print_table(rows, "No journal entries");
            }
            JournalCommand::Show { id } => {
                let entry: Value = api.get(&format!("/journal/{}", id)).await?;
                print_json(&entry)?;
            }
            JournalCommand::Add { title, text, tags } => {
                let body = json!({ "title": title, "text": text, "tags": tags });
                print_message(api.post("/journal", Some(body)).await?);
            }
            JournalCommand::Edit {
                id,
                title,
                text,
                tags,
            } => {
                let body = json!({ "title": title, "text": text, "tags": tags });
                print_message(api.put(&format!("/journal/{}", id), Some(body)).await?);
            }
            JournalCommand::Delete { id } => {
                print_message(api.delete(&format!("/journal/{}", id)).await?);
            }
            JournalCommand::Share { id } => {
                print_message(api.put(&format!("/journal/{}/share", id), None).await?);
            }
            JournalCommand::Unshare { id } => {
                print_message(api.delete(&format!("/journal/{}/share", id)).await?);
            }
            JournalCommand::Shared => {
                let rows: Vec<JournalRow> = api.get("/journal/shared").await?;
                print_table(rows, "No shared entries");
            }
        },

        Commands::Patients(cmd) => match cmd {
            PatientsCommand::Unassigned => {
                let rows: Vec<PatientRow> =
                    api.get("/psychologists/me/patients/unassigned").await?;
                print_table(rows, "No unassigned patients");
            }
            PatientsCommand::Assigned => {
                let rows: Vec<PatientRow> = api.get("/psychologists/me/patients/assigned").await?;
                print_table(rows, "No assigned patients");
            }
            PatientsCommand::Assign { patient_id } => {
                print_message(
                    api.post(&format!("/psychologists/me/patients/{}", patient_id), None)
                        .await?,
                );
            }
            PatientsCommand::Moods { patient_id } => {
                let rows: Vec<MoodRow> = api
                    .get(&format!("/psychologists/me/patients/{}/moods", patient_id))
                    .await?;
                print_table(rows, "No moods recorded yet");
            }
        },

        Commands::Appointments(cmd) => {
            let me: Value = api.get("/auth/me").await?;
            let is_psychologist =
                me.get("role").and_then(Value::as_str) == Some("ROLE_PSYCHOLOGIST");
            let base = if is_psychologist {
                "/psychologists/me/appointments"
            } else {
                "/patients/me/appointments"
            };

            match cmd {
                AppointmentsCommand::List { status } => {
                    let path = match status {
                        Some(status) if is_psychologist => format!("{}?status={}", base, status),
                        _ => base.to_string(),
                    };
                    let rows: Vec<AppointmentRow> = api.get(&path).await?;
                    print_table(rows, "No appointments");
                }
                AppointmentsCommand::Book {
                    patient_id,
                    start,
                    end,
                } => {
                    let body = json!({
                        "patientId": patient_id,
                        "startTime": start,
                        "endTime": end,
                    });
                    print_message(api.post("/psychologists/me/appointments", Some(body)).await?);
                }
                AppointmentsCommand::Cancel { id } => {
                    print_message(api.post(&format!("{}/{}/cancel", base, id), None).await?);
                }
                AppointmentsCommand::Complete { id } => {
                    print_message(
                        api.post(&format!("/psychologists/me/appointments/{}/complete", id), None)
                            .await?,
                    );
                }
            }
        }
    }

    Ok(())
}
