use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rDose
/// CLI application to plan medication doses and reminders with SQLite
#[derive(Parser)]
#[command(
    name = "rdose",
    version = env!("CARGO_PKG_VERSION"),
    about = "A medication reminder CLI: plan doses, track intake and queue reminders with SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Optional prescription metadata shared by `add` and `edit`.
#[derive(Args, Debug, Clone, Default)]
pub struct PrescriptionArgs {
    #[arg(long = "doctor", help = "Prescribing doctor")]
    pub doctor: Option<String>,

    #[arg(long = "rx", help = "Prescription (Rx) number")]
    pub rx: Option<String>,

    #[arg(long = "pharmacy", help = "Pharmacy name")]
    pub pharmacy: Option<String>,

    #[arg(long = "phone", help = "Pharmacy phone number")]
    pub phone: Option<String>,

    #[arg(long = "instructions", help = "Free-text instructions (e.g. 'with food')")]
    pub instructions: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add defaults for missing configuration fields")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add a medication and create its doses and reminders
    Add {
        /// Medication name
        name: String,

        #[arg(long = "dosage", short = 'd', default_value_t = 1, help = "Units per dose")]
        dosage: i32,

        #[arg(
            long = "freq",
            short = 'f',
            default_value = "EVERYDAY",
            help = "Frequency token (see `rdose frequencies`)"
        )]
        frequency: String,

        #[arg(long = "from", help = "First day (YYYY-MM-DD, default: today)")]
        from: Option<String>,

        #[arg(long = "to", help = "Last day, inclusive (YYYY-MM-DD, default: --from)")]
        to: Option<String>,

        #[arg(
            long = "at",
            required = true,
            num_args = 1..,
            help = "Dose time(s) of day (HH:MM), repeatable or comma-separated"
        )]
        at: Vec<String>,

        #[arg(long = "type", short = 't', help = "Medication type (tablet, capsule, syrup, ...)")]
        med_type: Option<String>,

        #[command(flatten)]
        prescription: PrescriptionArgs,

        #[arg(long = "dry-run", help = "Show the doses without saving them")]
        dry_run: bool,
    },

    /// Edit a dose: the first --at updates it, further --at values add new doses
    Edit {
        /// Dose id (see `rdose list`)
        id: i64,

        #[arg(long = "name", help = "New medication name")]
        name: Option<String>,

        #[arg(long = "dosage", short = 'd', help = "Units per dose")]
        dosage: Option<i32>,

        #[arg(long = "freq", short = 'f', help = "Frequency token")]
        frequency: Option<String>,

        #[arg(long = "from", help = "First day (YYYY-MM-DD)")]
        from: Option<String>,

        #[arg(long = "to", help = "Last day, inclusive (YYYY-MM-DD)")]
        to: Option<String>,

        #[arg(long = "at", num_args = 1.., help = "Dose time(s) of day (HH:MM)")]
        at: Vec<String>,

        #[arg(long = "type", short = 't', help = "Medication type")]
        med_type: Option<String>,

        #[command(flatten)]
        prescription: PrescriptionArgs,
    },

    /// Mark a dose as taken
    Take {
        /// Dose id
        id: i64,

        #[arg(long = "undo", help = "Mark the dose as not taken again")]
        undo: bool,
    },

    /// Delete a dose by id, or all doses
    Del {
        /// Dose id
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        id: Option<i64>,

        #[arg(long = "all", help = "Delete every dose and reminder")]
        all: bool,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List doses
    List {
        #[arg(long, short, help = "Filter by year/month/day, a custom range (A:B) or 'all'")]
        period: Option<String>,

        #[arg(long = "today", help = "Show only today's doses")]
        now: bool,

        #[arg(long = "pending", help = "Hide doses already taken")]
        pending: bool,

        #[arg(long = "details", help = "Group by day and show prescription details")]
        details: bool,

        #[arg(long = "json", help = "Print doses as JSON")]
        json: bool,
    },

    /// List pending reminders
    Reminders {
        #[arg(long = "due", help = "Only reminders whose time has come")]
        due: bool,
    },

    /// List the available frequencies
    Frequencies,
}
