//! Seed the database with reference and demo data.
//!
//! The app catalogue and the sample conversations are always seeded. Apps are
//! upserted, so re-running refreshes their names and descriptions but keeps
//! each app's connected flag. Conversations that already exist are skipped
//! along with their messages.
//!
//! With `--demo-password`, demo users are created (existing emails are
//! skipped) and demo tasks are added when the task table is empty.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use backoffice_api::db::apps::AppSeed;
use backoffice_api::db::chats::ConversationSeed;
use backoffice_api::db::users::UserRecord;
use backoffice_api::db::{
    AppRepository, ChatRepository, RepositoryError, TaskRepository, UserRepository,
};
use backoffice_api::models::chat::CURRENT_USER_SENDER;
use backoffice_api::models::{NewTask, TaskListParams};
use backoffice_api::services::hash_password;
use backoffice_core::{ChatId, Email, TaskLabel, TaskPriority, TaskStatus, UserRole, UserStatus};

use super::{CommandError, connect};

const APPS: [AppSeed<'static>; 15] = [
    app("telegram", "Telegram", "Connect with Telegram for real-time communication.", false),
    app("notion", "Notion", "Effortlessly sync Notion pages for seamless collaboration.", true),
    app("figma", "Figma", "View and collaborate on Figma designs in one place.", true),
    app("trello", "Trello", "Sync Trello cards for streamlined project management.", false),
    app("slack", "Slack", "Integrate Slack for efficient team communication.", false),
    app("zoom", "Zoom", "Host Zoom meetings directly from the dashboard.", true),
    app("stripe", "Stripe", "Easily manage Stripe transactions and payments.", false),
    app("gmail", "Gmail", "Access and manage Gmail messages effortlessly.", true),
    app("medium", "Medium", "Explore and share Medium stories on your dashboard.", false),
    app("skype", "Skype", "Connect with Skype contacts seamlessly.", false),
    app("docker", "Docker", "Effortlessly manage Docker containers on your dashboard.", false),
    app("github", "GitHub", "Streamline code management with GitHub integration.", false),
    app("gitlab", "GitLab", "Efficiently manage code projects with GitLab integration.", false),
    app("discord", "Discord", "Connect with Discord for seamless team communication.", false),
    app("whatsapp", "WhatsApp", "Easily integrate WhatsApp for direct messaging.", false),
];

const fn app(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    connected: bool,
) -> AppSeed<'static> {
    AppSeed {
        id,
        name,
        description,
        logo: "",
        connected,
    }
}

struct SeedConversation {
    conversation: ConversationSeed<'static>,
    /// `(from the contact, text)`, oldest first.
    messages: &'static [(bool, &'static str)],
}

const CONVERSATIONS: [SeedConversation; 3] = [
    SeedConversation {
        conversation: ConversationSeed {
            id: "conv1",
            username: "alex_dev",
            full_name: "Alex John",
            title: "Senior Backend Dev",
            profile: "",
        },
        messages: &[
            (true, "Hey, is the staging deploy still blocked?"),
            (false, "It was, the migration just finished."),
            (true, "Great, I'll run the smoke tests now."),
        ],
    },
    SeedConversation {
        conversation: ConversationSeed {
            id: "conv2",
            username: "taylor.codes",
            full_name: "Taylor Grande",
            title: "Tech Lead",
            profile: "",
        },
        messages: &[
            (false, "Can you review the task board before standup?"),
            (true, "Sure, give me ten minutes."),
        ],
    },
    SeedConversation {
        conversation: ConversationSeed {
            id: "conv3",
            username: "john_stack",
            full_name: "John Doe",
            title: "",
            profile: "",
        },
        messages: &[(true, "Welcome aboard!")],
    },
];

/// `(first name, last name, email, role, status)`
const DEMO_USERS: [(&str, &str, &str, UserRole, UserStatus); 5] = [
    ("Olivia", "Martin", "olivia.martin@example.com", UserRole::Superadmin, UserStatus::Active),
    ("Jackson", "Lee", "jackson.lee@example.com", UserRole::Admin, UserStatus::Active),
    ("Isabella", "Nguyen", "isabella@example.com", UserRole::Manager, UserStatus::Inactive),
    ("William", "Kim", "will@example.com", UserRole::Cashier, UserStatus::Invited),
    ("Sofia", "Davis", "sofia.davis@example.com", UserRole::Cashier, UserStatus::Suspended),
];

/// `(title, status, label, priority)`
const DEMO_TASKS: [(&str, TaskStatus, TaskLabel, TaskPriority); 6] = [
    ("Fix users table pagination", TaskStatus::InProgress, TaskLabel::Bug, TaskPriority::High),
    ("Document the error codes", TaskStatus::Todo, TaskLabel::Documentation, TaskPriority::Low),
    ("Add CSV export for tasks", TaskStatus::Backlog, TaskLabel::Feature, TaskPriority::Medium),
    ("Rotate TLS certificates", TaskStatus::Done, TaskLabel::Feature, TaskPriority::Critical),
    ("Investigate slow chat listing", TaskStatus::Todo, TaskLabel::Bug, TaskPriority::Medium),
    ("Drop the legacy invite flow", TaskStatus::Canceled, TaskLabel::Feature, TaskPriority::Low),
];

/// What a seeding run wrote.
#[derive(Debug, Default)]
pub struct SeedSummary {
    pub apps: usize,
    pub conversations: usize,
    pub messages: usize,
    pub users: usize,
    pub tasks: usize,
}

/// Seed reference data, plus demo users and tasks when `demo_password` is set.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a write fails.
pub async fn run(demo_password: Option<&str>) -> Result<SeedSummary, CommandError> {
    let pool = connect().await?;
    let mut summary = SeedSummary::default();

    seed_apps(&pool, &mut summary).await?;
    seed_conversations(&pool, &mut summary).await?;

    if let Some(password) = demo_password {
        seed_users(&pool, password, &mut summary).await?;
        seed_tasks(&pool, &mut summary).await?;
    }

    tracing::info!("Seeding complete!");
    tracing::info!("  Apps upserted: {}", summary.apps);
    tracing::info!("  Conversations inserted: {}", summary.conversations);
    tracing::info!("  Messages inserted: {}", summary.messages);
    tracing::info!("  Users inserted: {}", summary.users);
    tracing::info!("  Tasks inserted: {}", summary.tasks);

    Ok(summary)
}

async fn seed_apps(pool: &PgPool, summary: &mut SeedSummary) -> Result<(), CommandError> {
    let repo = AppRepository::new(pool);
    for seed in &APPS {
        repo.upsert(seed).await?;
        summary.apps += 1;
    }
    Ok(())
}

async fn seed_conversations(pool: &PgPool, summary: &mut SeedSummary) -> Result<(), CommandError> {
    let repo = ChatRepository::new(pool);
    let now = Utc::now();

    for (offset, seed) in (1_i64..).zip(&CONVERSATIONS) {
        if !repo.insert_conversation(&seed.conversation).await? {
            tracing::info!(chat_id = seed.conversation.id, "Conversation exists, skipping");
            continue;
        }
        summary.conversations += 1;

        let chat_id = ChatId::new(seed.conversation.id);
        let started = now - Duration::hours(offset);
        for (minute, &(from_contact, text)) in (0_i64..).zip(seed.messages) {
            let sender = if from_contact {
                seed.conversation.username
            } else {
                CURRENT_USER_SENDER
            };
            let timestamp = started + Duration::minutes(minute);
            repo.insert_message_at(&chat_id, sender, text, timestamp).await?;
            summary.messages += 1;
        }
    }
    Ok(())
}

async fn seed_users(
    pool: &PgPool,
    password: &str,
    summary: &mut SeedSummary,
) -> Result<(), CommandError> {
    let repo = UserRepository::new(pool);
    let password_hash = hash_password(password)?;

    for &(first_name, last_name, email, role, status) in &DEMO_USERS {
        let email = Email::parse(email)?;
        let username = email.username();
        let record = UserRecord {
            first_name,
            last_name,
            username: &username,
            email: &email,
            password_hash: &password_hash,
            phone_number: "",
            status,
            role,
        };

        match repo.create(&record).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, email = %user.email, "Demo user created");
                summary.users += 1;
            }
            Err(RepositoryError::Conflict(_)) => {
                tracing::info!(email = %email, "User exists, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

async fn seed_tasks(pool: &PgPool, summary: &mut SeedSummary) -> Result<(), CommandError> {
    let repo = TaskRepository::new(pool);

    let existing = repo.list(&TaskListParams::default()).await?;
    if existing.meta.total > 0 {
        tracing::info!(total = existing.meta.total, "Tasks exist, skipping demo tasks");
        return Ok(());
    }

    for &(title, status, label, priority) in &DEMO_TASKS {
        let input = NewTask {
            title: title.to_owned(),
            status,
            label,
            priority,
            assignee: None,
            description: None,
            due_date: None,
        };
        let id = repo.next_id().await?;
        repo.create(&id, &input).await?;
        summary.tasks += 1;
    }
    Ok(())
}
