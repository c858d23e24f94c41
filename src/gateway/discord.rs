use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use serenity::client::{Client, Context, EventHandler};
use serenity::gateway::ShardManager;
use serenity::http::Http;
use serenity::model::channel::Message;
use serenity::model::event::ResumedEvent;
use serenity::model::gateway::{GatewayIntents, Ready};
use serenity::model::id::ChannelId;
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::error::{http_status, send_error, GatewayError};
use super::events::{EventSink, InboundEvent};
use super::session::{SessionState, SessionTracker};
use super::ChatGateway;

/// Bot credentials for the platform session.
#[derive(Clone)]
pub struct Credentials {
    pub token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("token", &"<redacted>").finish()
    }
}

/// Guilds for channel resolution, guild messages plus content for relaying.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT
}

/// Live handles of one established session.
struct Link {
    http: Arc<Http>,
    shard_manager: Arc<ShardManager>,
}

/// Owns the persistent connection to Discord. Inbound messages are pushed
/// into the [`EventSink`] handed over at construction.
pub struct DiscordGateway {
    tracker: SessionTracker,
    events: EventSink,
    link: ArcSwapOption<Link>,
}

/// Background task driving an established session. Resolves when the
/// session ends.
pub struct SessionRunner {
    task: JoinHandle<Result<(), GatewayError>>,
}

impl SessionRunner {
    pub fn from_task(task: JoinHandle<Result<(), GatewayError>>) -> Self {
        Self { task }
    }

    /// Waits for the session to end. A session that stops without an error
    /// is still a lost connection from the relay's point of view.
    pub async fn finished(self) -> GatewayError {
        match self.task.await {
            Ok(Ok(())) => GatewayError::Network("gateway session closed".to_string()),
            Ok(Err(e)) => e,
            Err(e) => GatewayError::Network(format!("gateway task failed: {e}")),
        }
    }
}

impl DiscordGateway {
    pub fn new(tracker: SessionTracker, events: EventSink) -> Self {
        Self {
            tracker,
            events,
            link: ArcSwapOption::empty(),
        }
    }

    /// Establishes the platform session and waits for the handshake to
    /// complete. Does not retry.
    pub async fn connect(&self, credentials: &Credentials) -> Result<SessionRunner, GatewayError> {
        self.tracker.set_state(SessionState::Connecting);

        let handler = Handler {
            events: self.events.clone(),
            tracker: self.tracker.clone(),
        };
        let mut client = match Client::builder(&credentials.token, intents())
            .event_handler(handler)
            .await
        {
            Ok(client) => client,
            Err(e) => {
                self.tracker.set_state(SessionState::Disconnected);
                return Err(e.into());
            }
        };

        self.link.store(Some(Arc::new(Link {
            http: client.http.clone(),
            shard_manager: client.shard_manager.clone(),
        })));

        let mut ready_rx = self.tracker.subscribe();
        let run_tracker = self.tracker.clone();
        let mut task = tokio::spawn(async move {
            let result = client.start().await.map_err(GatewayError::from);
            run_tracker.set_state(SessionState::Disconnected);
            result
        });

        tokio::select! {
            ready = async { ready_rx.wait_for(|s| *s == SessionState::Ready).await.is_ok() } => {
                if !ready {
                    task.abort();
                    self.tracker.set_state(SessionState::Disconnected);
                    return Err(GatewayError::Network("session tracker closed".to_string()));
                }
                Ok(SessionRunner::from_task(task))
            }
            finished = &mut task => {
                self.link.store(None);
                self.tracker.set_state(SessionState::Disconnected);
                let err = match finished {
                    Ok(Ok(())) => GatewayError::Network("gateway closed before ready".to_string()),
                    Ok(Err(e)) => e,
                    Err(e) => GatewayError::Network(format!("gateway task failed: {e}")),
                };
                Err(err)
            }
        }
    }

    /// Closes every shard of the current session.
    pub async fn shutdown(&self) {
        if let Some(link) = self.link.swap(None) {
            link.shard_manager.shutdown_all().await;
        }
        self.tracker.set_state(SessionState::Disconnected);
    }
}

#[async_trait]
impl ChatGateway for DiscordGateway {
    fn state(&self) -> SessionState {
        self.tracker.state()
    }

    fn identity(&self) -> Option<String> {
        self.tracker.identity()
    }

    async fn send_to_channel(&self, channel_id: u64, text: &str) -> Result<(), GatewayError> {
        let link = match self.link.load_full() {
            Some(link) if self.tracker.state() == SessionState::Ready => link,
            _ => {
                return Err(GatewayError::Network(
                    "gateway session is not ready".to_string(),
                ))
            }
        };
        if channel_id == 0 {
            return Err(GatewayError::ChannelNotFound(channel_id));
        }

        let channel = ChannelId::new(channel_id);
        channel
            .to_channel(&link.http)
            .await
            .map_err(|e| match e {
                serenity::Error::Http(ref http) if matches!(http_status(http), Some(403 | 404)) => {
                    GatewayError::ChannelNotFound(channel_id)
                }
                other => GatewayError::from(other),
            })?;

        channel
            .say(&link.http, text)
            .await
            .map_err(send_error)?;

        Ok(())
    }
}

struct Handler {
    events: EventSink,
    tracker: SessionTracker,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        let tag = ready.user.tag();
        tracing::info!("logged in as {tag}");
        self.tracker.set_identity(tag);
        self.tracker.set_state(SessionState::Ready);
    }

    async fn resume(&self, _ctx: Context, _event: ResumedEvent) {
        tracing::debug!("gateway session resumed");
        self.tracker.set_state(SessionState::Ready);
    }

    async fn message(&self, _ctx: Context, msg: Message) {
        let event = InboundEvent {
            channel_id: msg.channel_id.get(),
            author: msg.author.name.clone(),
            content: msg.content.clone(),
        };
        if !self.events.emit(event) {
            tracing::warn!("event stream closed, dropping message {}", msg.id);
        }
    }
}
