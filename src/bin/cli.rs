//! CampusEvents CLI
//!
//! Command-line access to the campus-events REST API:
//! - Manage events, RSVPs, organizations, members and reviews
//! - Manage chat rooms and follow a room's messages
//! - Manage users and check credentials
//! - Check the dev server and generate a config file

use anyhow::{bail, Context};
use campus_events::client::{CampusClient, ClientConfig};
use campus_events::config::{generate_default_config, Config};
use campus_events::models::*;
use campus_events::output::{render, OutputFormat, Tabular};
use campus_events::validation;
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "campus-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Command-line client for CampusEvents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server answering /api (campus-server or the backend itself)
    #[arg(long, default_value = "http://127.0.0.1:8084", global = true)]
    pub api_url: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    pub timeout: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Campus events
    #[command(subcommand)]
    Events(EventCommand),

    /// Event RSVPs
    #[command(subcommand)]
    Rsvp(RsvpCommand),

    /// Organizations
    #[command(subcommand)]
    Orgs(OrgCommand),

    /// Organization members
    #[command(subcommand)]
    Members(MemberCommand),

    /// Event reviews
    #[command(subcommand)]
    Reviews(ReviewCommand),

    /// Chat rooms
    #[command(subcommand)]
    Rooms(RoomCommand),

    /// Chat messages
    #[command(subcommand)]
    Messages(MessageCommand),

    /// User accounts
    #[command(subcommand)]
    Users(UserCommand),

    /// Check a username and password
    Login {
        username: String,
        #[arg(short, long)]
        password: String,
    },

    /// Show dev server and backend status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum EventCommand {
    /// List events
    List,
    /// Show one event
    Show { id: i64 },
    /// Create an event
    Create {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Start time (HH:mm:ss)
        #[arg(long)]
        time: String,
        #[arg(short, long, default_value = "")]
        location: String,
        #[arg(long, default_value = "0")]
        organization: i64,
        #[arg(long, default_value = "0")]
        created_by: i64,
        #[arg(long, default_value = "")]
        image_url: String,
        /// End date (YYYY-MM-DD or ISO datetime)
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Update fields of an event
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(short, long)]
        location: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Delete an event
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum RsvpCommand {
    /// List RSVPs, optionally for one event
    List {
        #[arg(short, long)]
        event: Option<i64>,
    },
    /// RSVP to an event
    Create {
        name: String,
        #[arg(short, long)]
        event: i64,
        #[arg(short, long, value_parser = parse_rsvp_status)]
        status: RsvpStatus,
        #[arg(short, long, default_value = "1")]
        user: i64,
    },
    /// Change an RSVP
    Update {
        id: i64,
        name: String,
        #[arg(short, long)]
        event: i64,
        #[arg(short, long, value_parser = parse_rsvp_status)]
        status: RsvpStatus,
    },
    /// Remove an RSVP
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum OrgCommand {
    /// List organizations
    List,
    /// Show one organization
    Show { id: i64 },
    /// Create an organization
    Create {
        name: String,
        #[arg(short, long)]
        description: String,
        #[arg(long)]
        created_by: String,
    },
    /// Update an organization
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        created_by: Option<String>,
    },
    /// Delete an organization
    Delete { id: i64 },
    /// Members listed under an organization
    Members { id: i64 },
}

#[derive(Subcommand)]
pub enum MemberCommand {
    /// Members of an organization
    List {
        #[arg(short, long)]
        organization: i64,
    },
    /// Register as a member
    Register {
        name: String,
        #[arg(short, long)]
        organization: i64,
        #[arg(short, long, default_value = "1")]
        user: i64,
        #[arg(short, long, default_value = "member", value_parser = parse_member_role)]
        role: MemberRole,
    },
    /// Edit a member
    Update {
        id: i64,
        name: String,
        #[arg(short, long, value_parser = parse_member_role)]
        role: MemberRole,
    },
    /// Remove a member
    Delete { id: i64 },
    /// Approve a pending member
    Approve { id: i64 },
}

#[derive(Subcommand)]
pub enum ReviewCommand {
    /// List reviews, optionally for one event
    List {
        #[arg(short, long)]
        event: Option<i64>,
    },
    /// Review an event that has ended
    Create {
        comments: String,
        #[arg(short, long)]
        event: i64,
        #[arg(short, long)]
        rating: u8,
        #[arg(short, long)]
        user: Option<i64>,
    },
    /// Edit a review
    Update {
        id: i64,
        comments: String,
        #[arg(short, long)]
        event: i64,
        #[arg(short, long)]
        rating: u8,
    },
    /// Delete a review
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum RoomCommand {
    /// List chat rooms
    List,
    /// Show one chat room
    Show { id: i64 },
    /// Create a chat room for an event
    Create {
        name: String,
        #[arg(short, long)]
        event: i64,
    },
    /// Rename a chat room
    Rename { id: i64, name: String },
    /// Delete a chat room
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum MessageCommand {
    /// Messages in a room
    List { room: i64 },
    /// Post a message
    Send {
        room: i64,
        message: String,
        #[arg(short, long, default_value = "1")]
        user: i64,
        /// Display name stored as createdBy
        #[arg(long, default_value = "UserName")]
        display_name: String,
    },
    /// Edit a message
    Edit { id: i64, message: String },
    /// Delete a message
    Delete { id: i64 },
    /// Print new messages as they arrive (Ctrl-C to stop)
    Watch {
        room: i64,
        /// Poll interval in seconds (default: chat.poll_interval_secs)
        #[arg(short, long)]
        interval: Option<u64>,
    },
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// List users
    List,
    /// Show one user
    Show { id: i64 },
    /// The signed-in user
    Me,
    /// Create a user
    Create {
        username: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long = "type", default_value = "user", value_parser = parse_user_type)]
        user_type: UserType,
        #[arg(long, default_value = "active", value_parser = parse_user_status)]
        status: UserStatus,
    },
    /// Delete a user
    Delete { id: i64 },
}

fn parse_rsvp_status(s: &str) -> Result<RsvpStatus, String> {
    s.parse().map_err(|e: UnknownValue| e.to_string())
}

fn parse_member_role(s: &str) -> Result<MemberRole, String> {
    s.parse().map_err(|e: UnknownValue| e.to_string())
}

fn parse_user_type(s: &str) -> Result<UserType, String> {
    s.parse().map_err(|e: UnknownValue| e.to_string())
}

fn parse_user_status(s: &str) -> Result<UserStatus, String> {
    s.parse().map_err(|e: UnknownValue| e.to_string())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = CampusClient::new(ClientConfig {
        base_url: cli.api_url.clone(),
        timeout_secs: cli.timeout,
    })?;
    let format = cli.format;

    match cli.command {
        Commands::Events(cmd) => events(&client, format, cmd).await,
        Commands::Rsvp(cmd) => rsvps(&client, format, cmd).await,
        Commands::Orgs(cmd) => organizations(&client, format, cmd).await,
        Commands::Members(cmd) => members(&client, format, cmd).await,
        Commands::Reviews(cmd) => reviews(&client, format, cmd).await,
        Commands::Rooms(cmd) => rooms(&client, format, cmd).await,
        Commands::Messages(cmd) => messages(&client, format, cmd).await,
        Commands::Users(cmd) => users(&client, format, cmd).await,

        Commands::Login { username, password } => {
            if let Some(error) = validation::check_login(&username, &password).first() {
                bail!("{}", error);
            }
            let ok = client
                .authenticate(&LoginRequest {
                    user_name: username,
                    password,
                })
                .await
                .context("Login failed. Please check your credentials.")?;
            if !ok {
                bail!("Login failed. Please check your credentials.");
            }
            println!("Successfully Logged In!");
            Ok(())
        }

        Commands::Status => status(&client).await,

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
            Ok(())
        }
    }
}

fn print_records<T: Tabular + Serialize>(format: OutputFormat, records: &[T]) -> anyhow::Result<()> {
    print!("{}", render(format, records)?);
    Ok(())
}

fn print_record<T: Tabular + Serialize>(format: OutputFormat, record: &T) -> anyhow::Result<()> {
    print_records(format, std::slice::from_ref(record))
}

async fn events(client: &CampusClient, format: OutputFormat, cmd: EventCommand) -> anyhow::Result<()> {
    match cmd {
        EventCommand::List => {
            let events = client.list_events().await.context("Error fetching events")?;
            print_records(format, &events)
        }
        EventCommand::Show { id } => {
            let event = client.get_event(id).await.context("Error fetching event")?;
            print_record(format, &event)
        }
        EventCommand::Create {
            title,
            description,
            date,
            time,
            location,
            organization,
            created_by,
            image_url,
            end_date,
        } => {
            let input = EventInput {
                title,
                description,
                date,
                time: validation::parse_event_time(&time)?,
                location,
                organization_id: organization,
                created_by,
                image_url,
                end_date,
            };
            let event = client
                .create_event(&input)
                .await
                .context("Error creating event")?;
            println!("Event created successfully! (id {})", event.id);
            Ok(())
        }
        EventCommand::Update {
            id,
            title,
            description,
            date,
            time,
            location,
            image_url,
            end_date,
        } => {
            let current = client.get_event(id).await.context("Error fetching event")?;
            let mut input = EventInput::from(&current);
            if let Some(title) = title {
                input.title = title;
            }
            if let Some(description) = description {
                input.description = description;
            }
            if date.is_some() {
                input.date = date;
            }
            if let Some(location) = location {
                input.location = location;
            }
            if let Some(image_url) = image_url {
                input.image_url = image_url;
            }
            if end_date.is_some() {
                input.end_date = end_date;
            }
            input.time = validation::parse_event_time(time.as_deref().unwrap_or(&current.time))?;

            client
                .update_event(id, &input)
                .await
                .context("Error updating event")?;
            println!("Event updated successfully!");
            Ok(())
        }
        EventCommand::Delete { id } => {
            client.delete_event(id).await.context("Error deleting event")?;
            println!("Event deleted successfully!");
            Ok(())
        }
    }
}

async fn rsvps(client: &CampusClient, format: OutputFormat, cmd: RsvpCommand) -> anyhow::Result<()> {
    match cmd {
        RsvpCommand::List { event } => {
            let mut participants = client
                .list_participants()
                .await
                .context("Error fetching participants")?;
            if let Some(event_id) = event {
                participants.retain(|p| p.event_id == event_id);
            }
            print_records(format, &participants)
        }
        RsvpCommand::Create {
            name,
            event,
            status,
            user,
        } => {
            validation::check_rsvp(&name, Some(event), Some(status))?;
            client
                .create_participant(&RsvpInput {
                    user_id: user,
                    name,
                    event_id: event,
                    status,
                })
                .await
                .context("Error RSVPing for event")?;
            println!("RSVP successful!");
            Ok(())
        }
        RsvpCommand::Update {
            id,
            name,
            event,
            status,
        } => {
            validation::check_rsvp(&name, Some(event), Some(status))?;
            client
                .update_participant(
                    id,
                    &RsvpUpdate {
                        name,
                        status,
                        event_id: event,
                    },
                )
                .await
                .context("Error updating participant")?;
            println!("Participant updated successfully!");
            Ok(())
        }
        RsvpCommand::Delete { id } => {
            client
                .delete_participant(id)
                .await
                .context("Error removing participant")?;
            println!("Participant removed successfully!");
            Ok(())
        }
    }
}

async fn organizations(
    client: &CampusClient,
    format: OutputFormat,
    cmd: OrgCommand,
) -> anyhow::Result<()> {
    match cmd {
        OrgCommand::List => {
            let orgs = client
                .list_organizations()
                .await
                .context("Error fetching organizations")?;
            print_records(format, &orgs)
        }
        OrgCommand::Show { id } => {
            let org = client
                .get_organization(id)
                .await
                .context("Error finding organization")?;
            print_record(format, &org)
        }
        OrgCommand::Create {
            name,
            description,
            created_by,
        } => {
            let org = client
                .create_organization(&OrganizationInput {
                    name,
                    description,
                    created_by,
                    created_at: Utc::now(),
                })
                .await
                .context("Error creating organization")?;
            println!("Organization successfully created (id {})", org.id);
            Ok(())
        }
        OrgCommand::Update {
            id,
            name,
            description,
            created_by,
        } => {
            let current = client
                .get_organization(id)
                .await
                .context("Error finding organization")?;
            let input = OrganizationInput {
                name: name.unwrap_or(current.name),
                description: description.unwrap_or(current.description),
                created_by: created_by.unwrap_or(current.created_by),
                created_at: Utc::now(),
            };
            client
                .update_organization(id, &input)
                .await
                .context("Error updating organization")?;
            println!("Organization successfully updated");
            Ok(())
        }
        OrgCommand::Delete { id } => {
            client
                .delete_organization(id)
                .await
                .context("Error deleting organization")?;
            println!("Organization deleted successfully!");
            Ok(())
        }
        OrgCommand::Members { id } => {
            let members = client
                .organization_members(id)
                .await
                .context("Error fetching members")?;
            print_records(format, &members)
        }
    }
}

async fn members(
    client: &CampusClient,
    format: OutputFormat,
    cmd: MemberCommand,
) -> anyhow::Result<()> {
    match cmd {
        MemberCommand::List { organization } => {
            let members = client
                .list_members(organization)
                .await
                .context("Error fetching members")?;
            if members.is_empty() && format == OutputFormat::Table {
                println!("No members found for this organization.");
                return Ok(());
            }
            print_records(format, &members)
        }
        MemberCommand::Register {
            name,
            organization,
            user,
            role,
        } => {
            validation::check_member_registration(&name, Some(role))?;
            let org_name = client
                .get_organization(organization)
                .await
                .map(|o| o.name)
                .unwrap_or_else(|_| format!("organization {}", organization));
            let now = Utc::now();
            client
                .register_member(&MemberInput {
                    user_id: user,
                    organization_id: organization,
                    name,
                    role,
                    joined_at: now,
                    created_at: now,
                })
                .await
                .context("Error registering as a member")?;
            println!("Successfully registered as a member of {}!", org_name);
            Ok(())
        }
        MemberCommand::Update { id, name, role } => {
            client
                .update_member(id, &MemberUpdate { name, role })
                .await
                .context("Error updating member")?;
            println!("Member updated successfully!");
            Ok(())
        }
        MemberCommand::Delete { id } => {
            client.delete_member(id).await.context("Error deleting member")?;
            println!("Member deleted successfully!");
            Ok(())
        }
        MemberCommand::Approve { id } => {
            client
                .approve_member(id)
                .await
                .context("Error approving member")?;
            println!("Member approved successfully!");
            Ok(())
        }
    }
}

async fn reviews(
    client: &CampusClient,
    format: OutputFormat,
    cmd: ReviewCommand,
) -> anyhow::Result<()> {
    match cmd {
        ReviewCommand::List { event } => {
            let mut reviews = client.list_reviews().await.context("Error fetching reviews")?;
            if let Some(event_id) = event {
                reviews.retain(|r| r.event_id == event_id);
            }
            print_records(format, &reviews)
        }
        ReviewCommand::Create {
            comments,
            event,
            rating,
            user,
        } => {
            let target = client.get_event(event).await.context("Error fetching event")?;
            validation::check_review(Some(&target), rating, &comments, Utc::now())?;
            client
                .create_review(&ReviewInput {
                    event_id: event,
                    comments,
                    rating,
                    user_id: user,
                })
                .await
                .context("Error submitting review")?;
            println!("Review submitted successfully!");
            Ok(())
        }
        ReviewCommand::Update {
            id,
            comments,
            event,
            rating,
        } => {
            if !(1..=5).contains(&rating) || comments.trim().is_empty() {
                bail!("{}", validation::ValidationError::ReviewIncomplete);
            }
            client
                .update_review(
                    id,
                    &ReviewInput {
                        event_id: event,
                        comments,
                        rating,
                        user_id: None,
                    },
                )
                .await
                .context("Error updating review")?;
            println!("Review updated successfully!");
            Ok(())
        }
        ReviewCommand::Delete { id } => {
            client.delete_review(id).await.context("Error deleting review")?;
            println!("Review deleted successfully!");
            Ok(())
        }
    }
}

async fn rooms(client: &CampusClient, format: OutputFormat, cmd: RoomCommand) -> anyhow::Result<()> {
    match cmd {
        RoomCommand::List => {
            let rooms = client
                .list_chat_rooms()
                .await
                .context("Error fetching chat rooms")?;
            print_records(format, &rooms)
        }
        RoomCommand::Show { id } => {
            let room = client
                .get_chat_room(id)
                .await
                .context("Error fetching chat room details")?;
            print_record(format, &room)
        }
        RoomCommand::Create { name, event } => {
            validation::check_chat_room(&name, Some(event))?;
            let room = client
                .create_chat_room(&ChatRoomInput {
                    name,
                    event_id: event,
                })
                .await
                .context("Error creating chat room")?;
            println!("Chat room created successfully! (id {})", room.id);
            Ok(())
        }
        RoomCommand::Rename { id, name } => {
            if name.trim().is_empty() {
                bail!("{}", validation::ValidationError::FieldsMissing);
            }
            client
                .rename_chat_room(id, &name)
                .await
                .context("Error updating chat room")?;
            println!("Chat room updated successfully!");
            Ok(())
        }
        RoomCommand::Delete { id } => {
            client
                .delete_chat_room(id)
                .await
                .context("Error deleting chat room")?;
            println!("Chat room deleted successfully!");
            Ok(())
        }
    }
}

async fn messages(
    client: &CampusClient,
    format: OutputFormat,
    cmd: MessageCommand,
) -> anyhow::Result<()> {
    match cmd {
        MessageCommand::List { room } => {
            let messages = client
                .list_messages(room)
                .await
                .context("Error fetching chat messages")?;
            print_records(format, &messages)
        }
        MessageCommand::Send {
            room,
            message,
            user,
            display_name,
        } => {
            validation::check_message(&message)?;
            client
                .send_message(&ChatMessageInput {
                    message,
                    user_id: user,
                    chat_room_id: room,
                    created_by: display_name,
                })
                .await
                .context("Error sending message")?;
            println!("Message sent!");
            Ok(())
        }
        MessageCommand::Edit { id, message } => {
            validation::check_message(&message)?;
            client
                .edit_message(id, &message)
                .await
                .context("Error updating message")?;
            println!("Message updated!");
            Ok(())
        }
        MessageCommand::Delete { id } => {
            client
                .delete_message(id)
                .await
                .context("Error deleting message")?;
            println!("Message deleted!");
            Ok(())
        }
        MessageCommand::Watch { room, interval } => {
            let secs = interval.unwrap_or_else(|| Config::load_default().chat.poll_interval_secs);
            watch(client, room, Duration::from_secs(secs.max(1))).await
        }
    }
}

/// Poll a room and print messages not printed before, until Ctrl-C.
/// A failed poll is reported and the next tick tries again.
async fn watch(client: &CampusClient, room: i64, every: Duration) -> anyhow::Result<()> {
    let room_name = client
        .get_chat_room(room)
        .await
        .map(|r| r.name)
        .unwrap_or_else(|_| format!("room {}", room));
    println!("Watching {} (every {}s, Ctrl-C to stop)", room_name, every.as_secs());
    println!("{}", "-".repeat(60));

    follow(client, room, every, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await;

    println!();
    println!("Stopped watching {}", room_name);
    Ok(())
}

/// Poll loop behind `watch`. `stop` is polled across ticks and in-flight
/// fetches alike, so it ends the loop at any point.
async fn follow<F>(client: &CampusClient, room: i64, every: Duration, stop: F)
where
    F: std::future::Future<Output = ()>,
{
    tokio::pin!(stop);
    let mut seen: HashSet<i64> = HashSet::new();
    let mut ticker = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = &mut stop => return,
            _ = ticker.tick() => {}
        }
        tokio::select! {
            _ = &mut stop => return,
            fetched = client.list_messages(room) => match fetched {
                Ok(messages) => {
                    for line in unseen_lines(&mut seen, messages) {
                        println!("{}", line);
                    }
                }
                Err(e) => eprintln!("Error fetching chat messages: {}", e),
            },
        }
    }
}

/// "User <id>: <message>" for each message whose id was not seen yet
fn unseen_lines(seen: &mut HashSet<i64>, messages: Vec<ChatMessage>) -> Vec<String> {
    messages
        .into_iter()
        .filter(|m| seen.insert(m.id))
        .map(|m| format!("User {}: {}", m.user_id, m.message))
        .collect()
}

async fn users(client: &CampusClient, format: OutputFormat, cmd: UserCommand) -> anyhow::Result<()> {
    match cmd {
        UserCommand::List => {
            let users = client.list_users().await.context("Failed to fetch users")?;
            print_records(format, &users)
        }
        UserCommand::Show { id } => {
            let user = client.get_user(id).await.context("Error fetching user data")?;
            print_record(format, &user)
        }
        UserCommand::Me => {
            let user = client
                .current_user()
                .await
                .context("Error fetching user data")?;
            print_record(format, &user)
        }
        UserCommand::Create {
            username,
            first_name,
            last_name,
            email,
            password,
            phone,
            image,
            user_type,
            status,
        } => {
            let user = client
                .create_user(&UserInput {
                    first_name,
                    last_name,
                    email,
                    phone,
                    user_type,
                    user_name: username,
                    image,
                    status,
                    password,
                })
                .await
                .context("Error creating user")?;
            println!("User created successfully (id {})", user.id);
            Ok(())
        }
        UserCommand::Delete { id } => {
            client.delete_user(id).await.context("Error deleting user")?;
            println!("User deleted");
            Ok(())
        }
    }
}

async fn status(client: &CampusClient) -> anyhow::Result<()> {
    let health = match client.server_health().await {
        Ok(health) => health,
        Err(e) => {
            eprintln!("Cannot connect to campus-server at {}", client.base_url());
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("Make sure the dev server is running:");
            eprintln!("  cargo run --bin campus-server");
            std::process::exit(1);
        }
    };

    println!("CampusEvents v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Server status: {}", health["status"].as_str().unwrap_or("unknown"));
    println!(
        "Backend: {} ({})",
        health["backend_url"].as_str().unwrap_or("-"),
        health["backend"].as_str().unwrap_or("unknown")
    );

    if let Some(uptime) = health["uptime_seconds"].as_u64() {
        println!();
        println!("Uptime: {}", format_duration(uptime));
    }
    Ok(())
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Json, Router};
    use serde_json::json;

    fn message(id: i64, text: &str) -> ChatMessage {
        ChatMessage {
            id,
            user_id: 3,
            message: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_unseen_lines_skip_printed_messages() {
        let mut seen = HashSet::new();
        let first = unseen_lines(&mut seen, vec![message(1, "hi"), message(2, "hello")]);
        assert_eq!(first, vec!["User 3: hi", "User 3: hello"]);

        let second = unseen_lines(&mut seen, vec![message(1, "hi"), message(2, "hello"), message(3, "bye")]);
        assert_eq!(second, vec!["User 3: bye"]);
    }

    #[tokio::test]
    async fn test_follow_stops_during_slow_fetch() {
        // Backend slower than the stop signal: the loop must not wait for it
        let router = Router::new().route(
            "/api/chat-messages",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({ "data": [], "errors": [], "hasErrors": false }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let client = CampusClient::new(ClientConfig {
            base_url: format!("http://{}", addr),
            timeout_secs: 10,
        })
        .unwrap();

        let started = std::time::Instant::now();
        follow(&client, 1, Duration::from_secs(1), tokio::time::sleep(Duration::from_millis(200))).await;
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
