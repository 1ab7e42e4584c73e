//! `eventhub` command-line front end
//!
//! Drives the campus, admin and student view models against a live backend
//! and prints the rendered views. Logs go to stderr.

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use eventhub::add_event_form::FormField;
use eventhub::admin::{AdminAction, AdminReducer, AdminState, AdminTab};
use eventhub::campus::{CampusAction, CampusReducer, CampusState};
use eventhub::config::DEFAULT_LOG_FILTER;
use eventhub::event_draft::{DraftField, parse_tags};
use eventhub::events_list::EventsListAction;
use eventhub::render::{AdminView, CampusView, EventDetailView, NoticeList, StudentView};
use eventhub::student::{
    DEPARTMENTS, GRADUATION_YEARS, PaymentCard, RegistrationStep, StudentAction, StudentReducer,
    StudentState,
};
use eventhub::{AppEnvironment, Config, Notice, Persona};
use eventhub_api::EventHubClient;
use eventhub_api::types::{EventFilters, EventId, EventPatch, NewUser};
use eventhub_runtime::Store;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type CampusStore = Store<CampusState, CampusAction, AppEnvironment, CampusReducer>;
type AdminStore = Store<AdminState, AdminAction, AppEnvironment, AdminReducer>;
type StudentStore = Store<StudentState, StudentAction, AppEnvironment, StudentReducer>;

#[derive(Parser)]
#[command(name = "eventhub", version, about = "Browse and manage campus events")]
struct Cli {
    /// Backend base URL, overriding `EVENTHUB_API_BASE_URL`
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Campus Events: a shared list with an admin and a user view
    Campus {
        #[command(subcommand)]
        command: CampusCommand,
    },
    /// EventHub admin portal
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
    /// EventHub student portal
    Student {
        #[command(subcommand)]
        command: StudentCommand,
    },
    /// Check that the backend is up
    Health,
}

#[derive(Subcommand)]
enum CampusCommand {
    /// List events, sorted by date
    List {
        /// Show the admin view
        #[arg(long)]
        admin: bool,
        /// Filter by title or description (user view only)
        #[arg(long)]
        search: Option<String>,
        /// Mark an event as interesting (user view only, repeatable)
        #[arg(long, value_name = "ID")]
        interested: Vec<i64>,
    },
    /// Add an event
    Add(CampusEventArgs),
    /// Delete an event
    Delete {
        /// Event to delete
        id: i64,
        /// Confirm the delete
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct CampusEventArgs {
    #[arg(long)]
    title: String,
    /// `YYYY-MM-DD`
    #[arg(long)]
    date: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "")]
    speaker_name: String,
    #[arg(long, default_value = "")]
    speaker_title: String,
    #[arg(long, default_value = "")]
    speaker_bio: String,
    /// Registration form URL
    #[arg(long, default_value = "")]
    form_link: String,
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Totals and recent registrations
    Dashboard,
    /// All events
    Events,
    /// All users
    Users,
    /// All registrations
    Registrations,
    /// Create an event
    AddEvent(DraftArgs),
    /// Change some fields of an event
    UpdateEvent(UpdateArgs),
    /// Delete an event and its registrations
    DeleteEvent {
        /// Event to delete
        id: i64,
        /// Confirm the delete
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct DraftArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    /// `YYYY-MM-DD`
    #[arg(long)]
    date: String,
    /// `HH:MM`
    #[arg(long)]
    time: String,
    #[arg(long)]
    location: String,
    #[arg(long)]
    category: String,
    #[arg(long)]
    capacity: String,
    #[arg(long)]
    price: String,
    #[arg(long, default_value = "")]
    image: String,
    #[arg(long, default_value = "")]
    organizer: String,
    /// Comma-separated
    #[arg(long, default_value = "")]
    tags: String,
}

#[derive(Args)]
struct UpdateArgs {
    /// Event to change
    id: i64,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    time: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    capacity: Option<u32>,
    #[arg(long)]
    price: Option<f64>,
    #[arg(long)]
    image: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    organizer: Option<String>,
    /// Comma-separated; replaces every tag
    #[arg(long)]
    tags: Option<String>,
}

impl UpdateArgs {
    fn patch(self) -> EventPatch {
        EventPatch {
            title: self.title,
            description: self.description,
            date: self.date,
            time: self.time,
            location: self.location,
            category: self.category,
            capacity: self.capacity,
            price: self.price,
            image: self.image,
            status: self.status,
            organizer: self.organizer,
            tags: self.tags.as_deref().map(parse_tags),
        }
    }
}

#[derive(Subcommand)]
enum StudentCommand {
    /// Browse events
    Browse {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one event with its remaining spots
    Show {
        /// Event to show
        event_id: i64,
    },
    /// Register for an event and pay
    Register(RegisterArgs),
}

#[derive(Args)]
struct RegisterArgs {
    /// Event to register for
    event_id: i64,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    student_id: String,
    #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(DEPARTMENTS))]
    department: String,
    #[arg(long, value_parser = parse_graduation_year)]
    graduation_year: i32,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    card_number: String,
    /// `MM/YY`
    #[arg(long)]
    expiry_date: String,
    #[arg(long)]
    cvv: String,
    #[arg(long)]
    cardholder_name: String,
}

fn parse_graduation_year(raw: &str) -> Result<i32, String> {
    let year: i32 = raw.parse().map_err(|_| format!("`{raw}` is not a year"))?;
    if GRADUATION_YEARS.contains(&year) {
        Ok(year)
    } else {
        Err(format!(
            "graduation year must be between {} and {}",
            GRADUATION_YEARS.start(),
            GRADUATION_YEARS.end()
        ))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(base_url = %config.api.base_url(), "Configuration loaded");
    let client = EventHubClient::new(&config.api).context("Failed to build HTTP client")?;
    let env = AppEnvironment::live(client);
    let wait = config.wait_timeout;

    match cli.command {
        Command::Campus { command } => campus(command, env, wait).await,
        Command::Admin { command } => admin(command, env, wait).await,
        Command::Student { command } => student(command, env, wait).await,
        Command::Health => {
            let health = env.api.health().await.context("Backend is unreachable")?;
            println!(
                "{} (database: {})",
                health.status,
                health.database.as_deref().unwrap_or("unknown")
            );
            Ok(())
        },
    }
}

async fn campus(command: CampusCommand, env: AppEnvironment, wait: Duration) -> Result<()> {
    match command {
        CampusCommand::List {
            admin,
            search,
            interested,
        } => {
            let store = CampusStore::new(CampusState::default(), CampusReducer, env);
            store
                .send_and_wait_for(CampusAction::LoadEvents, CampusAction::is_load_result, wait)
                .await?;
            if admin {
                store.send(CampusAction::TogglePersona).await.wait().await;
            }
            if let Some(query) = search {
                store
                    .send(CampusAction::List(EventsListAction::SetQuery(query)))
                    .await
                    .wait()
                    .await;
            }
            for id in interested {
                store
                    .send(CampusAction::List(EventsListAction::ToggleInterest(EventId(id))))
                    .await
                    .wait()
                    .await;
            }
            print_campus(&store).await
        },

        CampusCommand::Add(args) => {
            let store = admin_campus_store(env);
            for (field, value) in [
                (FormField::Title, args.title),
                (FormField::Date, args.date),
                (FormField::Description, args.description),
                (FormField::SpeakerName, args.speaker_name),
                (FormField::SpeakerTitle, args.speaker_title),
                (FormField::SpeakerBio, args.speaker_bio),
                (FormField::FormLink, args.form_link),
            ] {
                store
                    .send(CampusAction::SetFormField(field, value))
                    .await
                    .wait()
                    .await;
            }

            let submittable = store.state(|s| s.form.payload(s.persona).is_some()).await;
            if !submittable {
                bail!("An event needs a title and a YYYY-MM-DD date");
            }
            store
                .send_and_wait_for(CampusAction::SubmitForm, CampusAction::is_mutation_result, wait)
                .await?;
            print_campus(&store).await
        },

        CampusCommand::Delete { id, yes } => {
            if !yes {
                bail!("Refusing to delete event {id} without --yes");
            }
            let store = admin_campus_store(env);
            store
                .send_and_wait_for(
                    CampusAction::DeleteEvent(EventId(id)),
                    CampusAction::is_mutation_result,
                    wait,
                )
                .await?;
            print_campus(&store).await
        },
    }
}

fn admin_campus_store(env: AppEnvironment) -> CampusStore {
    let state = CampusState {
        persona: Persona::Admin,
        ..CampusState::default()
    };
    CampusStore::new(state, CampusReducer, env)
}

async fn print_campus(store: &CampusStore) -> Result<()> {
    let (view, error) = store
        .state(|s| (CampusView(s).to_string(), s.error.clone()))
        .await;
    match error {
        Some(error) => Err(anyhow!(error)),
        None => {
            print!("{view}");
            Ok(())
        },
    }
}

async fn admin(command: AdminCommand, env: AppEnvironment, wait: Duration) -> Result<()> {
    let store = AdminStore::new(AdminState::default(), AdminReducer, env);

    let tab = match command {
        AdminCommand::Dashboard => AdminTab::Dashboard,
        AdminCommand::Events => AdminTab::Events,
        AdminCommand::Users => AdminTab::Users,
        AdminCommand::Registrations => AdminTab::Registrations,

        AdminCommand::AddEvent(args) => {
            store.send(AdminAction::OpenDraft).await.wait().await;
            for (field, value) in [
                (DraftField::Title, args.title),
                (DraftField::Description, args.description),
                (DraftField::Date, args.date),
                (DraftField::Time, args.time),
                (DraftField::Location, args.location),
                (DraftField::Category, args.category),
                (DraftField::Capacity, args.capacity),
                (DraftField::Price, args.price),
                (DraftField::Image, args.image),
                (DraftField::Organizer, args.organizer),
                (DraftField::Tags, args.tags),
            ] {
                store
                    .send(AdminAction::SetDraftField(field, value))
                    .await
                    .wait()
                    .await;
            }
            store
                .send_and_wait_for(AdminAction::SubmitDraft, AdminAction::is_mutation_result, wait)
                .await?;
            return print_admin_mutation(&store).await;
        },

        AdminCommand::UpdateEvent(args) => {
            let id = EventId(args.id);
            let patch = args.patch();
            if patch.is_empty() {
                bail!("Nothing to update for event {id}");
            }
            store
                .send_and_wait_for(
                    AdminAction::UpdateEvent { id, patch },
                    AdminAction::is_mutation_result,
                    wait,
                )
                .await?;
            return print_admin_mutation(&store).await;
        },

        AdminCommand::DeleteEvent { id, yes } => {
            if !yes {
                bail!("Refusing to delete event {id} without --yes");
            }
            store
                .send_and_wait_for(
                    AdminAction::DeleteEvent(EventId(id)),
                    AdminAction::is_mutation_result,
                    wait,
                )
                .await?;
            return print_admin_mutation(&store).await;
        },
    };

    store
        .send_and_wait_for(AdminAction::LoadAll, AdminAction::is_load_result, wait)
        .await?;
    store.send(AdminAction::SelectTab(tab)).await.wait().await;

    let (view, error) = store
        .state(|s| (AdminView(s).to_string(), s.error.clone()))
        .await;
    if let Some(error) = error {
        bail!("Error: {error}");
    }
    print!("{view}");
    Ok(())
}

async fn print_admin_mutation(store: &AdminStore) -> Result<()> {
    let notices = store.state(|s| s.notices.clone()).await;
    store.send(AdminAction::DismissNotices).await.wait().await;
    fail_on_error_notice(&notices)?;

    store.send(AdminAction::SelectTab(AdminTab::Events)).await.wait().await;
    let view = store.state(|s| AdminView(s).to_string()).await;
    print!("{view}");
    Ok(())
}

async fn student(command: StudentCommand, env: AppEnvironment, wait: Duration) -> Result<()> {
    match command {
        StudentCommand::Browse { category, search } => {
            let mut filters = EventFilters::default();
            if let Some(category) = category {
                filters = filters.with_category(category);
            }
            if let Some(search) = search {
                filters = filters.with_search(search);
            }

            let store = StudentStore::new(StudentState::with_filters(filters), StudentReducer, env);
            load_student(&store, wait).await?;
            let view = store.state(|s| StudentView(s).to_string()).await;
            print!("{view}");
            Ok(())
        },
        StudentCommand::Show { event_id } => {
            let event = env
                .api
                .get_event(EventId(event_id))
                .await
                .with_context(|| format!("Failed to fetch event {event_id}"))?;
            print!("{}", EventDetailView(&event));
            Ok(())
        },
        StudentCommand::Register(args) => register(args, env, wait).await,
    }
}

async fn load_student(store: &StudentStore, wait: Duration) -> Result<()> {
    store
        .send_and_wait_for(StudentAction::LoadData, StudentAction::is_load_result, wait)
        .await?;
    match store.state(|s| s.error.clone()).await {
        Some(error) => bail!("Error: {error}"),
        None => Ok(()),
    }
}

/// Walk the registration workflow end to end
///
/// Confirming without a user only opens the user form, so after the user
/// is created the confirmation is sent a second time.
async fn register(args: RegisterArgs, env: AppEnvironment, wait: Duration) -> Result<()> {
    let store = StudentStore::new(StudentState::default(), StudentReducer, env);
    load_student(&store, wait).await?;

    let event_id = EventId(args.event_id);
    store.send(StudentAction::SelectEvent(event_id)).await.wait().await;
    if store.state(|s| s.step).await != RegistrationStep::EventSelected {
        bail!("Event {event_id} is not open for registration");
    }

    store.send(StudentAction::ConfirmRegistration).await.wait().await;
    if store.state(|s| s.step).await == RegistrationStep::AwaitingUserInfo {
        let user = NewUser {
            name: args.name,
            email: args.email,
            student_id: args.student_id,
            department: args.department,
            graduation_year: args.graduation_year,
            phone: args.phone.filter(|phone| !phone.trim().is_empty()),
        };
        store
            .send_and_wait_for(
                StudentAction::SubmitUserInfo(user),
                StudentAction::is_user_result,
                wait,
            )
            .await?;
        show_student_notices(&store).await?;
    }

    store
        .send_and_wait_for(
            StudentAction::ConfirmRegistration,
            StudentAction::is_registration_result,
            wait,
        )
        .await?;
    show_student_notices(&store).await?;

    let card = PaymentCard {
        card_number: args.card_number,
        expiry_date: args.expiry_date,
        cvv: args.cvv,
        cardholder_name: args.cardholder_name,
    };
    store
        .send_and_wait_for(
            StudentAction::SubmitPayment(card),
            StudentAction::is_payment_result,
            wait,
        )
        .await?;
    show_student_notices(&store).await?;

    let view = store.state(|s| StudentView(s).to_string()).await;
    print!("{view}");
    Ok(())
}

async fn show_student_notices(store: &StudentStore) -> Result<()> {
    let notices = store.state(|s| s.notices.clone()).await;
    store.send(StudentAction::DismissNotices).await.wait().await;
    fail_on_error_notice(&notices)
}

fn fail_on_error_notice(notices: &[Notice]) -> Result<()> {
    if let Some(error) = notices.iter().find(|notice| notice.is_error()) {
        bail!("{error}");
    }
    print!("{}", NoticeList(notices));
    Ok(())
}
