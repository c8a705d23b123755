mod cli;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use schoolhub::config::Config;
use schoolhub::handlers::{self, ActionOutcome};
use schoolhub::http::ApiClient;
use schoolhub::models::{
    AttendanceMark, BookDraft, Credentials, HealthUpdate, SaleRequest, TeacherUpdate,
};
use schoolhub::session::Session;
use schoolhub::store::{AppState, Store};

use cli::{AttendanceCommand, BookFields, BooksCommand, Cli, Command, HealthCommand, TeacherCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    schoolhub::logging::init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    }
    .with_env_overrides()?;

    let session = Session::file(config.storage.resolved_path());
    let api = ApiClient::new(&config.api, session.clone()).context("building API client")?;
    let store = Store::new(AppState::with_user(session.user()));
    handlers::auth::install_session_guard(&store, &api);

    tracing::debug!(base_url = %api.base_url(), "Client ready");

    let outcome = execute(cli.command, &store, &api, &session).await?;
    if !outcome.success {
        if let Some(message) = &outcome.message {
            eprintln!("error: {}", message);
        }
        std::process::exit(1);
    }
    Ok(())
}

/// Run one action creator, print the slice it touched, then reset it.
async fn execute(
    command: Command,
    store: &Store,
    api: &ApiClient,
    session: &Session,
) -> anyhow::Result<ActionOutcome> {
    let outcome = match command {
        Command::Login(args) => {
            let credentials = Credentials {
                email: args.email,
                roll_num: args.roll_num,
                student_name: args.name,
                password: args.password,
            };
            let outcome = handlers::auth::login(store, api, args.role, &credentials).await;
            print_json(&store.select(|s| s.auth.clone()))?;
            handlers::auth::reset(store);
            outcome
        }
        Command::Logout => handlers::auth::logout(store, session),
        Command::Whoami => {
            let auth = store.select(|s| s.auth.clone());
            print_json(&auth)?;
            ActionOutcome {
                success: auth.data.is_some(),
                message: auth.data.is_none().then(|| "not signed in".to_string()),
            }
        }
        Command::Books(books) => {
            let outcome = run_books(books, store, api).await;
            print_json(&store.select(|s| s.library.clone()))?;
            handlers::library::reset(store);
            outcome
        }
        Command::Health(health) => {
            let outcome = match health {
                HealthCommand::Show { student_id } => {
                    handlers::health::fetch_record(store, api, &student_id).await
                }
                HealthCommand::Save { student_id, fields } => {
                    let update = HealthUpdate(cli::into_extra(fields));
                    handlers::health::save_record(store, api, &student_id, &update).await
                }
                HealthCommand::SaveOwn { fields } => {
                    let update = HealthUpdate(cli::into_extra(fields));
                    handlers::health::save_own_record(store, api, &update).await
                }
            };
            print_json(&store.select(|s| s.health.clone()))?;
            handlers::health::reset(store);
            outcome
        }
        Command::Teacher(teacher) => {
            let outcome = match teacher {
                TeacherCommand::Show { teacher_id } => {
                    handlers::teacher::fetch_profile(store, api, &teacher_id).await
                }
                TeacherCommand::Update {
                    teacher_id,
                    name,
                    email,
                    password,
                } => {
                    let update = TeacherUpdate {
                        name,
                        email,
                        password,
                        extra: Default::default(),
                    };
                    handlers::teacher::update_profile(store, api, &teacher_id, &update).await
                }
            };
            print_json(&store.select(|s| s.teacher.clone()))?;
            handlers::teacher::reset(store);
            outcome
        }
        Command::Attendance(AttendanceCommand::Mark {
            student,
            subject,
            date,
            status,
        }) => {
            let mark = AttendanceMark {
                student_id: student,
                subject_id: subject,
                date,
                status,
            };
            let outcome = handlers::attendance::mark(store, api, &mark).await;
            print_json(&store.select(|s| s.attendance.clone()))?;
            handlers::attendance::reset(store);
            outcome
        }
    };
    Ok(outcome)
}

async fn run_books(command: BooksCommand, store: &Store, api: &ApiClient) -> ActionOutcome {
    match command {
        BooksCommand::List { school_id } => {
            handlers::library::fetch_books(store, api, &school_id).await
        }
        BooksCommand::Add { school, fields } => {
            let draft = BookDraft {
                school_id: Some(school),
                ..book_draft(fields)
            };
            handlers::library::add_book(store, api, &draft).await
        }
        BooksCommand::Update { book_id, fields } => {
            handlers::library::update_book(store, api, &book_id, &book_draft(fields)).await
        }
        BooksCommand::Delete { book_id } => {
            handlers::library::delete_book(store, api, &book_id).await
        }
        BooksCommand::Sell {
            book,
            school,
            student,
            quantity,
        } => {
            let sale = SaleRequest {
                book_id: book,
                school_id: school,
                student_id: student,
                quantity,
            };
            handlers::library::sell_book(store, api, &sale).await
        }
        BooksCommand::Sales { school_id } => {
            handlers::library::fetch_sales(store, api, &school_id).await
        }
    }
}

fn book_draft(fields: BookFields) -> BookDraft {
    BookDraft {
        school_id: None,
        title: fields.title,
        author: fields.author,
        price: fields.price,
        quantity: fields.quantity,
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing state")?;
    println!("{}", json);
    Ok(())
}
