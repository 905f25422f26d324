//! Topic commands

use crate::app::App;
use crate::render::render;
use clap::{Args, Subcommand};
use gametalk_core::{GtErrorKind, Topic, TopicDraft};

#[derive(Debug, Args)]
pub struct TopicsArgs {
    #[command(subcommand)]
    pub command: TopicsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TopicsCommand {
    /// Cached topics first, then the server's list
    List {
        /// Skip the cached list and wait for the server
        #[arg(long)]
        refresh: bool,
    },
    /// One topic; counts a view when it is cached
    Show { id: i64 },
    Create(DraftArgs),
    /// Change a topic's title and description
    Update {
        id: i64,
        #[command(flatten)]
        draft: DraftArgs,
    },
    Delete { id: i64 },
    /// Cached topics of one category (works offline)
    ByCategory { id: i64 },
}

#[derive(Debug, Args)]
pub struct DraftArgs {
    #[arg(long)]
    pub category: i64,

    #[arg(long)]
    pub user: i64,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: String,
}

impl DraftArgs {
    fn into_draft(self) -> TopicDraft {
        TopicDraft::new(self.category, self.user, self.title, self.description)
    }
}

pub async fn execute(app: &App, args: TopicsArgs) -> anyhow::Result<()> {
    match args.command {
        TopicsCommand::List { refresh } => {
            render(app.topics.stream_topics(refresh), |topics| {
                print_list(topics)
            })
            .await
        }
        TopicsCommand::Show { id } => execute_show(app, id).await,
        TopicsCommand::Create(draft) => {
            render(app.topics.create_topic(&draft.into_draft()), |topic| {
                println!("Tema creado:");
                print_topic(topic);
            })
            .await
        }
        TopicsCommand::Update { id, draft } => {
            render(app.topics.update_topic(id, &draft.into_draft()), |topic| {
                println!("Tema actualizado:");
                print_topic(topic);
            })
            .await
        }
        TopicsCommand::Delete { id } => {
            render(app.topics.delete_topic(id), |_| {
                println!("Tema {} eliminado", id)
            })
            .await
        }
        TopicsCommand::ByCategory { id } => {
            let topics = app.topics.observe_topics_by_category(id).next().await?;
            print_list(&topics);
            Ok(())
        }
    }
}

async fn execute_show(app: &App, id: i64) -> anyhow::Result<()> {
    render(app.topics.get_topic_by_id(id), print_topic).await?;
    match app.topics.record_view(id) {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == GtErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn print_list(topics: &[Topic]) {
    if topics.is_empty() {
        println!("No hay temas");
    }
    for topic in topics {
        println!(
            "{:>5}  {}  [cat {} | {} vistas | {} respuestas]",
            topic.id, topic.title, topic.category_id, topic.views_count, topic.replies_count
        );
    }
}

fn print_topic(topic: &Topic) {
    println!("#{} {}", topic.id, topic.title);
    println!("{}", topic.description);
    println!(
        "categoría {} | autor {} | {} vistas | {} respuestas",
        topic.category_id, topic.user_id, topic.views_count, topic.replies_count
    );
}
