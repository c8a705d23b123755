//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use schoolhub::models::{AttendanceStatus, Extra, Role};
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(name = "schoolhub", version, about = "Client for the school management API")]
pub struct Cli {
    /// Config file (default: ~/.config/schoolhub/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and persist the issued token
    Login(LoginArgs),
    /// Forget the stored token and user
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Library inventory and sales
    #[command(subcommand)]
    Books(BooksCommand),
    /// Student health records
    #[command(subcommand)]
    Health(HealthCommand),
    /// Teacher profile
    #[command(subcommand)]
    Teacher(TeacherCommand),
    /// Attendance marking
    #[command(subcommand)]
    Attendance(AttendanceCommand),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long, value_parser = parse_role)]
    pub role: Role,
    #[arg(long)]
    pub email: Option<String>,
    /// Student roll number
    #[arg(long)]
    pub roll_num: Option<String>,
    /// Student name, used together with --roll-num
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct BookFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub price: Option<f64>,
    #[arg(long)]
    pub quantity: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum BooksCommand {
    List {
        school_id: String,
    },
    Add {
        #[arg(long)]
        school: String,
        #[command(flatten)]
        fields: BookFields,
    },
    Update {
        book_id: String,
        #[command(flatten)]
        fields: BookFields,
    },
    Delete {
        book_id: String,
    },
    Sell {
        #[arg(long)]
        book: String,
        #[arg(long)]
        school: String,
        #[arg(long)]
        student: Option<String>,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    Sales {
        school_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum HealthCommand {
    Show {
        student_id: String,
    },
    /// Save a student's record (staff)
    Save {
        student_id: String,
        /// Form field as key=value; JSON values are parsed
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
    /// Save the signed-in student's own record
    SaveOwn {
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, Value)>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TeacherCommand {
    Show {
        teacher_id: String,
    },
    Update {
        teacher_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AttendanceCommand {
    Mark {
        #[arg(long)]
        student: String,
        #[arg(long)]
        subject: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long, value_parser = parse_status)]
        status: AttendanceStatus,
    },
}

fn parse_role(s: &str) -> Result<Role, String> {
    Role::parse(s).ok_or_else(|| format!("unknown role '{}' (admin, student, teacher, finance)", s))
}

fn parse_status(s: &str) -> Result<AttendanceStatus, String> {
    match s.to_lowercase().as_str() {
        "present" => Ok(AttendanceStatus::Present),
        "absent" => Ok(AttendanceStatus::Absent),
        _ => Err(format!("unknown status '{}' (present, absent)", s)),
    }
}

fn parse_field(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    if key.is_empty() {
        return Err("field name must not be empty".to_string());
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

pub fn into_extra(fields: Vec<(String, Value)>) -> Extra {
    fields.into_iter().collect()
}
