use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context as _};
use chrono::{DateTime, Utc};
use clap::CommandFactory;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use labnet_core::{
    conversation_id, ArticleDetails, JobDetails, LabnetError, PostDraft, PostKind, PostPatch,
    UserPatch,
};
use labnet_storage::FileStore;
use labnet_store::{views, Command as StoreCommand, JobFilter, Outcome, Store};

use crate::cli::*;
use crate::config::CliConfig;
use crate::{format, validate};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let data_dir = cli.data_dir;
    match cli.command {
        Command::Init(args) => cmd_init(&data_dir, args, cli.format),
        Command::Completions(args) => cmd_completions(args),
        command => Session::open(&data_dir, cli.format)?.run(command),
    }
}

fn cmd_init(data_dir: &Path, args: InitArgs, format: Option<OutputFormat>) -> anyhow::Result<()> {
    let fresh = !FileStore::is_initialized(data_dir);
    let backend = FileStore::init(data_dir)?;

    let config_path = CliConfig::path(data_dir);
    if args.force || !config_path.exists() {
        CliConfig::default().save(data_dir)?;
        debug!(path = %config_path.display(), "wrote config");
    }
    let config = CliConfig::load(data_dir)?;

    let mut store = Store::open(backend, config.store_config());
    store.persist_all();
    info!(data_dir = %data_dir.display(), fresh, "initialized");

    match format.unwrap_or(config.output.format) {
        OutputFormat::Json => print_json(&json!({
            "dataDir": data_dir.display().to_string(),
            "fresh": fresh,
        })),
        OutputFormat::Text => {
            let verb = if fresh { "Initialized" } else { "Reinitialized" };
            println!("{verb} labnet data directory in {}", data_dir.display());
            Ok(())
        }
    }
}

fn cmd_completions(args: CompletionsArgs) -> anyhow::Result<()> {
    clap_complete::generate(args.shell, &mut Cli::command(), "labnet", &mut io::stdout());
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn confirm(yes: bool, action: &str) -> anyhow::Result<()> {
    if !yes {
        bail!("refusing to {action} without --yes");
    }
    Ok(())
}

/// An open data directory plus the output settings for one invocation.
struct Session {
    store: Store<FileStore>,
    config: CliConfig,
    format: OutputFormat,
    now: DateTime<Utc>,
}

impl Session {
    fn open(data_dir: &Path, format: Option<OutputFormat>) -> anyhow::Result<Self> {
        let backend = FileStore::open(data_dir)?;
        let config = CliConfig::load(data_dir)?;
        let store = Store::open(backend, config.store_config());
        Ok(Self {
            format: format.unwrap_or(config.output.format),
            store,
            config,
            now: Utc::now(),
        })
    }

    fn run(mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Feed(args) => self.cmd_feed(args),
            Command::Post(args) => self.cmd_post(args),
            Command::EditPost(args) => self.cmd_edit_post(args),
            Command::DeletePost(args) => self.cmd_delete_post(args),
            Command::Like(args) => self.cmd_like(args),
            Command::Share(args) => self.cmd_share(args),
            Command::Comment(args) => self.cmd_comment(args),
            Command::DeleteComment(args) => self.cmd_delete_comment(args),
            Command::Save(args) => self.cmd_save(args),
            Command::Saved => self.cmd_saved(),
            Command::Notifications(args) => self.cmd_notifications(args),
            Command::Connect(args) => self.cmd_connect(args),
            Command::Accept(args) => self.cmd_accept(args),
            Command::Reject(args) => self.cmd_reject(args),
            Command::Withdraw(args) => self.cmd_withdraw(args),
            Command::Disconnect(args) => self.cmd_disconnect(args),
            Command::Network(args) => self.cmd_network(args),
            Command::Message(args) => self.cmd_message(args),
            Command::Conversations => self.cmd_conversations(),
            Command::Thread(args) => self.cmd_thread(args),
            Command::Profile(args) => self.cmd_profile(args),
            Command::Search(args) => self.cmd_search(args),
            Command::Jobs(args) => self.cmd_jobs(args),
            Command::Apply(args) => self.cmd_apply(args),
            Command::Init(_) | Command::Completions(_) => {
                unreachable!("handled before the store is opened")
            }
        }
    }

    fn me(&self) -> &str {
        &self.store.current_user().id
    }

    /// Run `command` and report its outcome. `Ignored` becomes an error
    /// carrying `missing`.
    fn apply(
        &mut self,
        command: StoreCommand,
        done: &str,
        missing: impl FnOnce() -> String,
    ) -> anyhow::Result<()> {
        let outcome = self.store.dispatch(command);
        if outcome == Outcome::Ignored {
            bail!(missing());
        }
        match self.format {
            OutputFormat::Json => print_json(&outcome),
            OutputFormat::Text => {
                match &outcome {
                    Outcome::Created(id) => println!("{done} {id}"),
                    _ => println!("{done}"),
                }
                Ok(())
            }
        }
    }

    fn print_posts(&self, posts: &[&labnet_core::Post]) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return print_json(posts);
        }
        if posts.is_empty() {
            println!("No posts.");
        }
        let saved = self.store.saved_posts();
        for post in posts {
            println!(
                "{}",
                format::post(post, self.me(), saved.contains(&post.id), self.now)
            );
        }
        Ok(())
    }

    fn cmd_feed(&mut self, args: FeedArgs) -> anyhow::Result<()> {
        let limit = args.limit.unwrap_or(self.config.output.feed_limit);
        let kind = args.kind.map(PostKind::from);
        let posts: Vec<_> = self
            .store
            .posts()
            .iter()
            .filter(|p| kind.map_or(true, |k| p.kind == k))
            .take(limit)
            .collect();
        self.print_posts(&posts)
    }

    fn cmd_post(&mut self, args: PostArgs) -> anyhow::Result<()> {
        let draft = draft_from_args(args);
        validate::post(&draft)?;
        let kind = draft.kind;
        self.apply(StoreCommand::AddPost { draft }, "Published", || {
            "post was not created".to_string()
        })?;
        debug!(kind = kind.as_str(), "post published");
        Ok(())
    }

    fn cmd_edit_post(&mut self, args: EditPostArgs) -> anyhow::Result<()> {
        let Some(post) = self.store.state().find_post(&args.id) else {
            bail!("no such post: {}", args.id);
        };
        if let Some(content) = &args.content {
            if post.kind != PostKind::Job && content.trim().is_empty() {
                return Err(validate::ValidationError::EmptyPost.into());
            }
        }
        let (youtube_url, pdf_url) = if args.clear_links {
            (Some(None), Some(None))
        } else {
            (args.youtube.map(Some), args.pdf.map(Some))
        };
        let patch = PostPatch {
            content: args.content,
            youtube_url,
            pdf_url,
            ..PostPatch::default()
        };
        let id = args.id;
        self.apply(
            StoreCommand::UpdatePost {
                id: id.clone(),
                patch,
            },
            "Updated",
            || format!("no such post: {id}"),
        )
    }

    fn cmd_delete_post(&mut self, args: DeletePostArgs) -> anyhow::Result<()> {
        confirm(args.yes, &format!("delete post {}", args.id))?;
        let id = args.id;
        self.apply(
            StoreCommand::DeletePost { id: id.clone() },
            "Deleted",
            || format!("no such post: {id}"),
        )
    }

    fn cmd_like(&mut self, args: PostRef) -> anyhow::Result<()> {
        let post_id = args.post_id;
        let outcome = self.store.dispatch(StoreCommand::LikePost {
            post_id: post_id.clone(),
        });
        if outcome == Outcome::Ignored {
            bail!("no such post: {post_id}");
        }
        let post = self
            .store
            .state()
            .find_post(&post_id)
            .with_context(|| format!("post {post_id} vanished"))?;
        let liked = post.is_liked_by(self.me());
        match self.format {
            OutputFormat::Json => print_json(&json!({
                "postId": post_id,
                "liked": liked,
                "likes": post.likes.len(),
            })),
            OutputFormat::Text => {
                let verb = if liked { "Liked" } else { "Unliked" };
                println!("{verb} {post_id} ({} likes)", post.likes.len());
                Ok(())
            }
        }
    }

    fn cmd_share(&mut self, args: PostRef) -> anyhow::Result<()> {
        let post_id = args.post_id;
        self.apply(
            StoreCommand::SharePost {
                post_id: post_id.clone(),
            },
            "Shared",
            || format!("no such post: {post_id}"),
        )
    }

    fn cmd_comment(&mut self, args: CommentArgs) -> anyhow::Result<()> {
        validate::comment(&args.content)?;
        let post_id = args.post_id;
        self.apply(
            StoreCommand::AddComment {
                post_id: post_id.clone(),
                content: args.content,
                parent_id: args.reply_to,
            },
            "Commented",
            || format!("no such post: {post_id}"),
        )
    }

    fn cmd_delete_comment(&mut self, args: DeleteCommentArgs) -> anyhow::Result<()> {
        confirm(args.yes, &format!("delete comment {}", args.comment_id))?;
        let DeleteCommentArgs {
            post_id,
            comment_id,
            ..
        } = args;
        let missing = format!("no comment {comment_id} on post {post_id}");
        self.apply(
            StoreCommand::DeleteComment {
                post_id,
                comment_id,
            },
            "Deleted",
            || missing,
        )
    }

    fn cmd_save(&mut self, args: PostRef) -> anyhow::Result<()> {
        let post_id = args.post_id;
        if self.store.state().find_post(&post_id).is_none()
            && !self.store.saved_posts().contains(&post_id)
        {
            bail!("no such post: {post_id}");
        }
        self.store.dispatch(StoreCommand::ToggleSavePost {
            post_id: post_id.clone(),
        });
        let saved = self.store.saved_posts().contains(&post_id);
        match self.format {
            OutputFormat::Json => print_json(&json!({ "postId": post_id, "saved": saved })),
            OutputFormat::Text => {
                let verb = if saved { "Saved" } else { "Unsaved" };
                println!("{verb} {post_id}");
                Ok(())
            }
        }
    }

    fn cmd_saved(&mut self) -> anyhow::Result<()> {
        let posts = views::saved_posts(self.store.state());
        self.print_posts(&posts)
    }

    fn cmd_notifications(&mut self, args: NotificationsArgs) -> anyhow::Result<()> {
        if args.read_all {
            return self.apply(StoreCommand::MarkAllNotificationsRead, "Marked all read", || {
                "no notifications".to_string()
            });
        }
        if let Some(id) = args.read {
            return self.apply(
                StoreCommand::MarkNotificationRead { id: id.clone() },
                "Marked read",
                || format!("no such notification: {id}"),
            );
        }

        let notifications: Vec<_> = self
            .store
            .notifications()
            .iter()
            .filter(|n| !args.unread || !n.read)
            .collect();
        if self.format == OutputFormat::Json {
            return print_json(&notifications);
        }
        println!(
            "{} unread",
            views::unread_notification_count(self.store.state())
        );
        for n in notifications {
            println!("{}", format::notification(n, self.now));
        }
        Ok(())
    }

    fn cmd_connect(&mut self, args: UserRef) -> anyhow::Result<()> {
        let user_id = args.user_id;
        if user_id == self.me() {
            bail!("cannot connect to yourself");
        }
        self.apply(
            StoreCommand::SendConnectionRequest {
                to: user_id.clone(),
            },
            "Sent request",
            || format!("no such user: {user_id}"),
        )
    }

    fn cmd_accept(&mut self, args: RequestRef) -> anyhow::Result<()> {
        let id = args.request_id;
        self.apply(
            StoreCommand::AcceptConnectionRequest { id: id.clone() },
            "Accepted",
            || format!("no pending request: {id}"),
        )
    }

    fn cmd_reject(&mut self, args: RequestRef) -> anyhow::Result<()> {
        let id = args.request_id;
        self.apply(
            StoreCommand::RejectConnectionRequest { id: id.clone() },
            "Rejected",
            || format!("no pending request: {id}"),
        )
    }

    fn cmd_withdraw(&mut self, args: WithdrawArgs) -> anyhow::Result<()> {
        confirm(args.yes, &format!("withdraw request {}", args.request_id))?;
        let id = args.request_id;
        self.apply(
            StoreCommand::WithdrawConnectionRequest { id: id.clone() },
            "Withdrawn",
            || format!("no pending request: {id}"),
        )
    }

    fn cmd_disconnect(&mut self, args: DisconnectArgs) -> anyhow::Result<()> {
        confirm(args.yes, &format!("disconnect from {}", args.user_id))?;
        let user_id = args.user_id;
        self.apply(
            StoreCommand::RemoveConnection {
                user_id: user_id.clone(),
            },
            "Disconnected",
            || format!("not connected to {user_id}"),
        )
    }

    fn cmd_network(&mut self, args: NetworkArgs) -> anyhow::Result<()> {
        let state = self.store.state();
        let connections = views::connections(state);
        let received = views::received_requests(state);
        let sent = views::sent_requests(state);
        let suggestions = views::suggestions(state, args.suggestions);

        if self.format == OutputFormat::Json {
            return print_json(&json!({
                "connections": connections,
                "received": received,
                "sent": sent,
                "suggestions": suggestions,
            }));
        }
        println!("Connections ({})", connections.len());
        for user in connections {
            println!("  {}", format::user_line(user));
        }
        println!("Received requests ({})", received.len());
        for r in received {
            println!("  {}", format::request(r, self.now));
        }
        println!("Sent requests ({})", sent.len());
        for r in sent {
            println!("  {}", format::request(r, self.now));
        }
        println!("People you may know");
        for user in suggestions {
            println!("  {}", format::user_line(user));
        }
        Ok(())
    }

    fn cmd_message(&mut self, args: MessageArgs) -> anyhow::Result<()> {
        validate::message(&args.content)?;
        let to = args.to;
        if to == self.me() {
            bail!("cannot message yourself");
        }
        self.apply(
            StoreCommand::SendMessage {
                to: to.clone(),
                content: args.content,
            },
            "Sent",
            || format!("no such user: {to}"),
        )
    }

    fn cmd_conversations(&mut self) -> anyhow::Result<()> {
        let me = self.me();
        let conversations: Vec<_> = self
            .store
            .conversations()
            .iter()
            .filter(|c| c.participants.iter().any(|p| p == me))
            .collect();
        if self.format == OutputFormat::Json {
            return print_json(&conversations);
        }
        if conversations.is_empty() {
            println!("No conversations.");
        }
        for c in conversations {
            let other = self.store.state().find_user(c.other_participant(me));
            println!("{}  [{}]", format::conversation(c, other, me), c.id);
        }
        Ok(())
    }

    fn cmd_thread(&mut self, args: UserRef) -> anyhow::Result<()> {
        let id = conversation_id(self.me(), &args.user_id);
        let thread: Vec<_> = views::conversation_thread(self.store.state(), &id)
            .into_iter()
            .cloned()
            .collect();
        if thread.is_empty() {
            bail!("no conversation with {}", args.user_id);
        }
        self.store
            .dispatch(StoreCommand::MarkConversationRead { id: id.clone() });

        if self.format == OutputFormat::Json {
            return print_json(&thread);
        }
        let state = self.store.state();
        for m in &thread {
            let sender = state.find_user(&m.from).map_or(m.from.as_str(), |u| u.name.as_str());
            println!("{}", format::message(m, sender, self.now));
        }
        Ok(())
    }

    fn cmd_profile(&mut self, args: ProfileArgs) -> anyhow::Result<()> {
        if args.is_edit() {
            if args.user_id.as_deref().is_some_and(|id| id != self.me()) {
                bail!("only your own profile can be edited");
            }
            self.edit_profile(args)?;
            let me = self.store.current_user();
            return match self.format {
                OutputFormat::Json => print_json(me),
                OutputFormat::Text => {
                    print!("{}", format::profile(me));
                    Ok(())
                }
            };
        }

        let user = match args.user_id.as_deref() {
            Some(id) => views::find_user(self.store.state(), id)
                .with_context(|| format!("no such user: {id}"))?,
            None => self.store.current_user(),
        };
        match self.format {
            OutputFormat::Json => print_json(user),
            OutputFormat::Text => {
                print!("{}", format::profile(user));
                Ok(())
            }
        }
    }

    fn edit_profile(&mut self, args: ProfileArgs) -> anyhow::Result<()> {
        let patch = UserPatch {
            name: args.name,
            avatar: args.avatar,
            cover_image: args.cover_image,
            title: args.title,
            bio: args.bio,
            institution: args.institution,
            location: args.location,
            skills: (!args.skills.is_empty()).then_some(args.skills),
            ..UserPatch::default()
        };

        let mut commands = Vec::new();
        if patch != UserPatch::default() {
            commands.push(StoreCommand::UpdateCurrentUser { patch });
        }
        if let Some(url) = args.add_image {
            commands.push(StoreCommand::AddToGallery { url });
        }
        let removing = args.remove_image.clone();
        if let Some(url) = args.remove_image {
            commands.push(StoreCommand::RemoveFromGallery { url });
        }

        let outcomes = self.store.dispatch_all(commands);
        if let (Some(url), Some(Outcome::Ignored)) = (removing, outcomes.last()) {
            bail!("image not in gallery: {url}");
        }
        Ok(())
    }

    fn cmd_search(&mut self, args: SearchArgs) -> anyhow::Result<()> {
        self.store
            .dispatch(StoreCommand::SetSearchQuery { query: args.query });
        let results = views::search(self.store.state(), self.store.search_query());

        if self.format == OutputFormat::Json {
            return print_json(&results);
        }
        if results.is_empty() {
            println!("No results for \"{}\".", self.store.search_query());
            return Ok(());
        }
        println!("People ({})", results.people.len());
        for user in &results.people {
            println!("  {}", format::user_line(user));
        }
        for (heading, posts) in [
            ("Posts", &results.posts),
            ("Articles", &results.articles),
            ("Jobs", &results.jobs),
        ] {
            println!("{heading} ({})", posts.len());
            for post in posts {
                println!("  {}", post_summary(post));
            }
        }
        Ok(())
    }

    fn cmd_jobs(&mut self, args: JobsArgs) -> anyhow::Result<()> {
        let filter = JobFilter {
            text: args.text,
            location: args.location,
            job_type: args.job_type,
            field: args.field,
        };
        let jobs = views::filter_jobs(self.store.state(), &filter);
        self.print_posts(&jobs)
    }

    fn cmd_apply(&mut self, args: ApplyArgs) -> anyhow::Result<()> {
        let input = if args.input == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            fs::read_to_string(&args.input)
                .with_context(|| format!("reading {}", args.input.display()))?
        };

        let value: serde_json::Value = serde_json::from_str(&input).map_err(LabnetError::from)?;
        let commands = if value.is_array() {
            serde_json::from_value::<Vec<StoreCommand>>(value)
        } else {
            serde_json::from_value::<StoreCommand>(value).map(|c| vec![c])
        }
        .map_err(LabnetError::from)
        .context("invalid command")?;

        debug!(count = commands.len(), "applying commands");
        let outcomes = self.store.dispatch_all(commands);
        match self.format {
            OutputFormat::Json => print_json(&outcomes),
            OutputFormat::Text => {
                for outcome in outcomes {
                    match outcome {
                        Outcome::Created(id) => println!("created {id}"),
                        Outcome::Applied => println!("applied"),
                        Outcome::Ignored => println!("ignored"),
                    }
                }
                Ok(())
            }
        }
    }
}

fn post_summary(post: &labnet_core::Post) -> String {
    let headline = match &post.job_details {
        Some(job) => format!("{} at {}", job.position, job.company),
        None => post.content.lines().next().unwrap_or_default().to_string(),
    };
    format!("{} · {} · {headline}", post.id, post.author.name)
}

fn draft_from_args(args: PostArgs) -> PostDraft {
    let kind = PostKind::from(args.kind);
    let job = args.job;
    let job_details = (kind == PostKind::Job).then(|| JobDetails {
        position: job.position.unwrap_or_default(),
        company: job.company.unwrap_or_default(),
        location: job.location.unwrap_or_default(),
        salary: job.salary,
        job_type: job.job_type.unwrap_or_else(|| "full-time".to_string()),
        field: job.field.unwrap_or_default(),
        level: job.level.unwrap_or_default(),
        description: job.description.unwrap_or_default(),
        requirements: job.requirements.unwrap_or_default(),
        benefits: job.benefits.unwrap_or_default(),
        ..JobDetails::default()
    });
    let article = args.article;
    let article_details = (kind == PostKind::Article).then(|| ArticleDetails {
        abstract_text: article.abstract_text.unwrap_or_default(),
        keywords: article.keywords,
        co_authors: article.co_authors,
        doi: article.doi,
        journal: article.journal,
        ..ArticleDetails::default()
    });
    PostDraft {
        content: args.content,
        images: args.images,
        youtube_url: args.youtube,
        pdf_url: args.pdf,
        kind,
        job_details,
        article_details,
    }
}
