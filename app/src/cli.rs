use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Confirm, Input};
use shared::{AppState, CheckInDraft, DEFAULT_MOOD, MAX_EMERGENCY_CONTACTS, PRESET_TAGS};
use std::path::PathBuf;

use still_here::backend::domain::commands::check_in::{CheckInCommand, LogListQuery};
use still_here::backend::domain::commands::contacts::{AddContactCommand, RemoveContactCommand};
use still_here::backend::domain::commands::profile::{CompleteOnboardingCommand, UpdateProfileCommand};
use still_here::backend::domain::display::{format_local_log_entry, mood_label, salutation_at};
use still_here::backend::domain::{Rejection, TransitionResult};
use still_here::{AppConfig, Backend};

#[derive(Parser)]
#[command(name = "still-here")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tell the people who care about you that you're still here", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the saved state (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/still-here/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show today's status and streak
    Status,

    /// Set up your nickname and first emergency contact
    Onboard {
        #[arg(long)]
        nickname: Option<String>,

        #[arg(long)]
        contact_name: Option<String>,

        #[arg(long)]
        contact_phone: Option<String>,

        #[arg(long)]
        contact_email: Option<String>,
    },

    /// Check in for today
    #[command(name = "check-in")]
    CheckIn {
        /// How you feel, 1 (sad) to 5 (great)
        #[arg(short, long, default_value_t = DEFAULT_MOOD, value_parser = clap::value_parser!(u8).range(1..=5))]
        mood: u8,

        /// Tag for today, repeatable (e.g. "All good", "A bit tired", "Need help")
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Anything you want to say
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Show past check-ins, newest first
    Logs {
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Manage emergency contacts
    Contacts {
        #[command(subcommand)]
        action: ContactAction,
    },

    /// Show or change how often you plan to check in
    Frequency {
        #[command(subcommand)]
        action: FrequencyAction,
    },

    /// Change your nickname or real name
    Profile {
        #[arg(long)]
        nickname: Option<String>,

        #[arg(long)]
        real_name: Option<String>,
    },

    /// Erase all data and start over
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ContactAction {
    /// List emergency contacts
    List,

    /// Add an emergency contact
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        email: String,
    },

    /// Remove an emergency contact by its number in `contacts list`
    Remove { position: usize },
}

#[derive(Subcommand)]
pub enum FrequencyAction {
    Show,
    Toggle,
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_directory = Some(dir);
    }
    let backend = Backend::new(&config)?;

    match cli.command {
        Commands::Status => status(&backend),
        Commands::Onboard {
            nickname,
            contact_name,
            contact_phone,
            contact_email,
        } => onboard(&backend, nickname, contact_name, contact_phone, contact_email),
        Commands::Reset { yes } => reset(&backend, yes),
        Commands::CheckIn { mood, tags, note } => {
            require_onboarded(&backend)?;
            check_in(&backend, mood, tags, note).await
        }
        Commands::Logs { limit } => {
            require_onboarded(&backend)?;
            logs(&backend, limit)
        }
        Commands::Contacts { action } => {
            require_onboarded(&backend)?;
            contacts(&backend, action)
        }
        Commands::Frequency { action } => {
            require_onboarded(&backend)?;
            frequency(&backend, action)
        }
        Commands::Profile { nickname, real_name } => {
            require_onboarded(&backend)?;
            profile(&backend, nickname, real_name)
        }
    }
}

fn require_onboarded(backend: &Backend) -> Result<()> {
    if backend.profile_service.get_state()?.is_first_time {
        anyhow::bail!("Setup is not finished yet. Run `still-here onboard` first.");
    }
    Ok(())
}

fn status(backend: &Backend) -> Result<()> {
    let state = backend.profile_service.get_state()?;
    let status = backend.check_in_service.status()?;

    println!("{}", salutation_at(&status.now).dimmed());
    println!("{}", format!("Hello, {}", state.display_name()).cyan().bold());
    println!();

    if state.is_first_time {
        println!("   Not set up yet. Run {} to get started.", "still-here onboard".bold());
        return Ok(());
    }

    if status.checked_in_today {
        println!("   Today:     {}", "Safe and well ✓".green());
    } else {
        println!("   Today:     {}", "Not checked in yet".yellow());
        println!("   Tags:      {}", PRESET_TAGS.join(", ").dimmed());
    }
    println!("   Streak:    {} day(s)", status.streak);
    if let Some(last) = status.last_check_in {
        println!("   Last:      {}", last.format("%Y-%m-%d %H:%M"));
    }
    println!("   Frequency: {}", status.frequency.description());
    println!(
        "   Contacts:  {}/{}",
        state.emergency_contacts.len(),
        MAX_EMERGENCY_CONTACTS
    );
    Ok(())
}

fn onboard(
    backend: &Backend,
    nickname: Option<String>,
    contact_name: Option<String>,
    contact_phone: Option<String>,
    contact_email: Option<String>,
) -> Result<()> {
    let state = backend.profile_service.get_state()?;
    if !state.is_first_time {
        println!("{}", "You're already set up.".yellow());
        return Ok(());
    }

    println!("{}", "I'm still here".cyan().bold());
    println!("A safety net for people living alone.");
    println!("Check in once a day; your contacts are warned if you go quiet.");
    println!("Everything stays on this device.");
    println!();

    let nickname = value_or_prompt(nickname, "What should we call you?", false)?;
    let contact_name = value_or_prompt(contact_name, "Emergency contact name", false)?;
    let contact_phone = value_or_prompt(contact_phone, "Contact phone (for SMS, optional)", true)?;
    let contact_email = value_or_prompt(contact_email, "Contact email (optional)", true)?;

    let state = backend.profile_service.complete_onboarding(CompleteOnboardingCommand {
        nickname,
        contact_name,
        contact_phone,
        contact_email,
    })?;

    println!();
    println!("{}", format!("You're all set, {}.", state.display_name()).green());
    println!("Run {} every day.", "still-here check-in".bold());
    Ok(())
}

fn value_or_prompt(value: Option<String>, prompt: &str, allow_empty: bool) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(allow_empty)
            .interact_text()
            .context("Failed to read input"),
    }
}

async fn check_in(backend: &Backend, mood: u8, tags: Vec<String>, note: String) -> Result<()> {
    let command = CheckInCommand {
        draft: CheckInDraft::new(tags, note, Some(mood)),
    };

    // Save first; the greeting only decorates an already-saved check-in
    let result = backend.check_in_service.check_in(command)?;
    if let Some(Rejection::AlreadyCheckedInToday) = result.rejection {
        println!("{}", "You've already checked in today.".yellow());
        println!("   Streak: {} day(s)", result.state.check_in_streak);
        return Ok(());
    }

    println!("{}", "Safe and well today ✓".green().bold());
    println!("   Streak: {} day(s)", result.state.check_in_streak);
    if let Some(label) = mood_label(mood) {
        println!("   Mood:   {}", label);
    }

    let greeting = backend
        .greeting_service
        .generate_greeting(result.state.display_name())
        .await;
    println!();
    println!("   \"{}\"", greeting.italic());
    Ok(())
}

fn logs(backend: &Backend, limit: Option<usize>) -> Result<()> {
    let result = backend.check_in_service.list_logs(LogListQuery { limit })?;

    if result.entries.is_empty() {
        println!("No check-ins yet.");
        return Ok(());
    }

    println!("{}", format!("Check-ins ({} total)", result.total).cyan().bold());
    for entry in &result.entries {
        let formatted = format_local_log_entry(entry);
        let mood = formatted.mood.unwrap_or("-");
        println!(
            "   {} {}  {:<6} {}",
            formatted.date,
            formatted.time.dimmed(),
            mood,
            formatted.tags
        );
        if let Some(note) = formatted.note {
            println!("         {}", note.italic());
        }
    }
    Ok(())
}

fn contacts(backend: &Backend, action: ContactAction) -> Result<()> {
    match action {
        ContactAction::List => {
            let contacts = backend.contact_service.list_contacts()?;
            if contacts.is_empty() {
                println!("No emergency contacts yet.");
            }
            for (i, contact) in contacts.iter().enumerate() {
                let mut channels = Vec::new();
                if !contact.phone.is_empty() {
                    channels.push(contact.phone.as_str());
                }
                if !contact.email.is_empty() {
                    channels.push(contact.email.as_str());
                }
                println!("   {}. {}  {}", i + 1, contact.name.bold(), channels.join(" · "));
            }
            Ok(())
        }
        ContactAction::Add { name, phone, email } => {
            let result = backend
                .contact_service
                .add_contact(AddContactCommand { name, phone, email })?;
            report(&result, "Contact added")
        }
        ContactAction::Remove { position } => {
            let index = position
                .checked_sub(1)
                .ok_or_else(|| anyhow::anyhow!("Contact numbers start at 1"))?;
            let result = backend
                .contact_service
                .remove_contact(RemoveContactCommand { index })?;
            report(&result, "Contact removed")
        }
    }
}

fn frequency(backend: &Backend, action: FrequencyAction) -> Result<()> {
    let state = match action {
        FrequencyAction::Show => backend.profile_service.get_state()?,
        FrequencyAction::Toggle => backend.profile_service.toggle_frequency()?,
    };
    println!("{}", state.frequency.description());
    Ok(())
}

fn reset(backend: &Backend, yes: bool) -> Result<()> {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("Erase all check-ins and contacts? This cannot be undone.")
            .default(false)
            .interact()?;

    if !confirmed {
        println!("Nothing was erased.");
        return Ok(());
    }

    backend.profile_service.reset_all_data()?;
    println!("{}", "All data erased.".yellow());
    Ok(())
}

fn report(result: &TransitionResult, success: &str) -> Result<()> {
    match result.rejection {
        None => {
            println!("{}", success.green());
            Ok(())
        }
        Some(Rejection::ContactIndexOutOfRange { index }) => {
            anyhow::bail!("There is no contact number {}", index + 1)
        }
        Some(rejection) => anyhow::bail!("{}", capitalize(&rejection.to_string())),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn profile(backend: &Backend, nickname: Option<String>, real_name: Option<String>) -> Result<()> {
    if nickname.is_none() && real_name.is_none() {
        anyhow::bail!("Nothing to change. Pass --nickname and/or --real-name.");
    }
    let state = backend
        .profile_service
        .update_profile(UpdateProfileCommand { nickname, real_name })?;
    println!("{}", "Profile saved".green());
    print_profile(&state);
    Ok(())
}

fn print_profile(state: &AppState) {
    println!("   Nickname:  {}", state.nickname);
    if state.real_name.is_empty() {
        println!("   Real name: {}", "(not set)".dimmed());
    } else {
        println!("   Real name: {}", state.real_name);
    }
}
