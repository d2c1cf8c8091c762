//! Text rendering for terminal output.

use chrono::{DateTime, Utc};

use labnet_core::{
    ConnectionRequest, Conversation, Message, Notification, Post, PostKind, User,
};

/// Compact relative age: `now`, `5m`, `3h`, `2d`, `4w`.
///
/// Timestamps in the future render as `now`.
#[must_use]
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - timestamp;
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours}h");
    }
    let days = elapsed.num_days();
    if days < 7 {
        return format!("{days}d");
    }
    format!("{}w", days / 7)
}

fn kind_badge(kind: PostKind) -> &'static str {
    match kind {
        PostKind::Post => "",
        PostKind::Article => "[article] ",
        PostKind::Job => "[job] ",
    }
}

/// One feed entry: header, body and counters.
#[must_use]
pub fn post(post: &Post, viewer: &str, saved: bool, now: DateTime<Utc>) -> String {
    let mut out = format!(
        "{}{} · {} · {}\n",
        kind_badge(post.kind),
        post.author.name,
        time_ago(post.timestamp, now),
        post.id
    );

    if let Some(job) = &post.job_details {
        out.push_str(&format!(
            "  {} at {} ({})\n",
            job.position, job.company, job.location
        ));
        if let Some(salary) = &job.salary {
            out.push_str(&format!("  salary: {salary}\n"));
        }
    }
    if let Some(article) = &post.article_details {
        if let Some(journal) = &article.journal {
            out.push_str(&format!("  published in {journal}\n"));
        }
    }
    for line in post.content.lines() {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    for url in post
        .images
        .iter()
        .chain(post.youtube_url.iter())
        .chain(post.pdf_url.iter())
    {
        out.push_str(&format!("  ↳ {url}\n"));
    }

    let liked = if post.is_liked_by(viewer) { " (liked)" } else { "" };
    let saved = if saved { " · saved" } else { "" };
    out.push_str(&format!(
        "  {} likes{liked} · {} comments · {} shares{saved}\n",
        post.likes.len(),
        post.comments.len(),
        post.shares
    ));

    for comment in post.top_level_comments() {
        out.push_str(&format!(
            "    {}: {} ({})\n",
            comment.author.name,
            comment.content,
            time_ago(comment.timestamp, now)
        ));
        for reply in post.replies_to(&comment.id) {
            out.push_str(&format!("      ↳ {}: {}\n", reply.author.name, reply.content));
        }
    }
    out
}

/// Name, title and affiliation on one line.
#[must_use]
pub fn user_line(user: &User) -> String {
    let mut line = format!("{} ({})", user.name, user.id);
    if !user.title.is_empty() {
        line.push_str(&format!(" · {}", user.title));
    }
    if !user.institution.is_empty() {
        line.push_str(&format!(" · {}", user.institution));
    }
    line
}

#[must_use]
pub fn profile(user: &User) -> String {
    let mut out = format!("{}\n", user_line(user));
    if !user.location.is_empty() {
        out.push_str(&format!("  {}\n", user.location));
    }
    if !user.bio.is_empty() {
        out.push_str(&format!("  {}\n", user.bio));
    }
    out.push_str(&format!(
        "  {} connections · {} profile views · {} citations\n",
        user.connections.len(),
        user.profile_views,
        user.citations
    ));
    if !user.skills.is_empty() {
        out.push_str(&format!("  skills: {}\n", user.skills.join(", ")));
    }
    if !user.research_interests.is_empty() {
        out.push_str(&format!(
            "  interests: {}\n",
            user.research_interests.join(", ")
        ));
    }

    if !user.experience.is_empty() {
        out.push_str("Experience\n");
        for e in &user.experience {
            let end = if e.current {
                "present"
            } else {
                e.end_date.as_deref().unwrap_or("?")
            };
            out.push_str(&format!(
                "  {} · {} ({} to {}) [{}]\n",
                e.position, e.institution, e.start_date, end, e.id
            ));
        }
    }
    if !user.education.is_empty() {
        out.push_str("Education\n");
        for e in &user.education {
            let end = if e.current {
                "present"
            } else {
                e.end_year.as_deref().unwrap_or("?")
            };
            out.push_str(&format!(
                "  {} {}, {} ({} to {}) [{}]\n",
                e.degree, e.field, e.institution, e.start_year, end, e.id
            ));
        }
    }
    if !user.publications.is_empty() {
        out.push_str("Publications\n");
        for p in &user.publications {
            out.push_str(&format!(
                "  {}. {} ({}), {} citations [{}]\n",
                p.title, p.journal, p.year, p.citations, p.id
            ));
        }
    }
    if !user.projects.is_empty() {
        out.push_str("Projects\n");
        for p in &user.projects {
            out.push_str(&format!("  {} ({:?}) [{}]\n", p.name, p.status, p.id));
        }
    }
    if !user.gallery.is_empty() {
        out.push_str(&format!("Gallery: {} images\n", user.gallery.len()));
    }
    out
}

#[must_use]
pub fn notification(n: &Notification, now: DateTime<Utc>) -> String {
    let marker = if n.read { " " } else { "*" };
    let target = n
        .post_id
        .as_deref()
        .map(|id| format!(" ({id})"))
        .unwrap_or_default();
    format!(
        "{marker} {} {}{target} · {} · {}",
        n.from.name,
        n.message,
        time_ago(n.timestamp, now),
        n.id
    )
}

#[must_use]
pub fn request(r: &ConnectionRequest, now: DateTime<Utc>) -> String {
    format!(
        "{} · from {} to {} · {} mutual · {}",
        r.id,
        r.from.name,
        r.to,
        r.mutual_connections,
        time_ago(r.timestamp, now)
    )
}

#[must_use]
pub fn conversation(c: &Conversation, other: Option<&User>, viewer: &str) -> String {
    let name = other.map_or_else(
        || c.other_participant(viewer).to_string(),
        |u| u.name.clone(),
    );
    let unread = if c.unread_count > 0 {
        format!(" ({} unread)", c.unread_count)
    } else {
        String::new()
    };
    format!("{name}{unread}: {}", c.last_message.content)
}

#[must_use]
pub fn message(m: &Message, sender: &str, now: DateTime<Utc>) -> String {
    format!("[{}] {sender}: {}", time_ago(m.timestamp, now), m.content)
}
