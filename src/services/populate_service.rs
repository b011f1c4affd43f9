// Populate service - resolves users and submits generated content to the API

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{error, info, warn};

use super::pace;
use crate::api::identity::extract_user_id;
use crate::api::ApiClient;
use crate::config::vocabulary::Vocabulary;
use crate::config::Pacing;
use crate::domain::{MessagePair, Post, Query, ResolvedUser, UserSpec};
use crate::error::{Result, SeedError};
use crate::generator::{
    generate_message_pairs, generate_posts, generate_queries, MESSAGE_PAIR_COUNT, POST_TARGET,
    QUERY_COUNT,
};

/// Which auth call a user's resolution ended on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStage {
    Signup,
    Login,
}

/// Outcome for one seed user.
///
/// A failed signup always falls back to a login; a failed login is final.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved { user: ResolvedUser, via: AuthStage },
    Failed { stage: AuthStage, reason: String },
}

/// Sender and receiver for one conversation
#[derive(Debug, Clone, PartialEq)]
pub enum PairSelection<'u> {
    Pair {
        sender: &'u ResolvedUser,
        receiver: &'u ResolvedUser,
    },
    /// The pool has no two users with distinct ids
    NotEnoughUsers,
}

/// Pick a uniformly random sender and a uniformly random receiver whose id
/// differs from the sender's.
pub fn select_pair<'u, R: Rng + ?Sized>(users: &'u [ResolvedUser], rng: &mut R) -> PairSelection<'u> {
    let Some(sender) = users.choose(rng) else {
        return PairSelection::NotEnoughUsers;
    };

    let receivers: Vec<&ResolvedUser> = users.iter().filter(|u| u.id != sender.id).collect();
    match receivers.choose(rng) {
        Some(&receiver) => PairSelection::Pair { sender, receiver },
        None => PairSelection::NotEnoughUsers,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseCounts {
    pub created: usize,
    pub failed: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedReport {
    pub users: Vec<ResolvedUser>,
    pub posts: PhaseCounts,
    pub queries: PhaseCounts,
    /// `created` and `failed` count single messages, `skipped` counts whole
    /// conversations
    pub messages: PhaseCounts,
}

pub struct PopulateService<'v> {
    api: ApiClient,
    vocabulary: &'v Vocabulary,
    pacing: Pacing,
}

impl<'v> PopulateService<'v> {
    pub fn new(api: ApiClient, vocabulary: &'v Vocabulary, pacing: Pacing) -> Self {
        Self {
            api,
            vocabulary,
            pacing,
        }
    }

    /// Run every phase: users, posts, queries, then messages.
    ///
    /// Only an empty user pool aborts; any other failure is logged and the
    /// record skipped.
    pub async fn run<R: Rng + ?Sized>(&self, users: &[UserSpec], rng: &mut R) -> Result<SeedReport> {
        info!("Starting database population against {}", self.api.base_url());

        info!("Creating users...");
        let pool = self.resolve_users(users).await;
        if pool.is_empty() {
            error!("No users created or found. Exiting...");
            return Err(SeedError::NoUsers);
        }
        info!("Created/found {} users", pool.len());

        let posts = generate_posts(self.vocabulary, POST_TARGET, rng)?;
        info!("Creating {} posts...", posts.len());
        let post_counts = self.seed_posts(&pool, &posts, rng).await;

        let queries = generate_queries(self.vocabulary, QUERY_COUNT, rng)?;
        info!("Creating {} queries...", queries.len());
        let query_counts = self.seed_queries(&pool, queries, rng).await;

        let pairs = generate_message_pairs(self.vocabulary, MESSAGE_PAIR_COUNT, rng)?;
        info!("Creating {} message conversations...", pairs.len());
        let message_counts = self.seed_messages(&pool, &pairs, rng).await;

        info!("Database population complete!");
        Ok(SeedReport {
            users: pool,
            posts: post_counts,
            queries: query_counts,
            messages: message_counts,
        })
    }

    pub async fn resolve_users(&self, users: &[UserSpec]) -> Vec<ResolvedUser> {
        let mut pool = Vec::with_capacity(users.len());
        for user in users {
            match self.resolve_user(user).await {
                Resolution::Resolved { user, .. } => pool.push(user),
                Resolution::Failed { stage, reason } => {
                    warn!("Skipping user {} after {:?}: {}", user.email, stage, reason);
                }
            }
        }
        pool
    }

    /// Sign the user up, falling back to a login when signup is refused.
    pub async fn resolve_user(&self, user: &UserSpec) -> Resolution {
        info!("Signing up user {}...", user.email);
        let signup = match self.api.signup(user).await {
            Ok(response) => response,
            Err(e) => {
                error!("Error processing user {}: {}", user.email, e);
                return Resolution::Failed {
                    stage: AuthStage::Signup,
                    reason: e.to_string(),
                };
            }
        };

        if signup.is_success() {
            info!("Successfully signed up user {}", user.email);
            return Self::resolution_from_body(user, AuthStage::Signup, &signup.body);
        }

        info!(
            "Sign up failed ({}) or user exists, trying to login {}...",
            signup.status, user.email
        );
        let login = match self.api.login(user).await {
            Ok(response) => response,
            Err(e) => {
                error!("Error processing user {}: {}", user.email, e);
                return Resolution::Failed {
                    stage: AuthStage::Login,
                    reason: e.to_string(),
                };
            }
        };

        if login.is_success() {
            info!("Successfully logged in user {}", user.email);
            return Self::resolution_from_body(user, AuthStage::Login, &login.body);
        }

        warn!("Failed to login user {}: {}", user.email, login.body);
        Resolution::Failed {
            stage: AuthStage::Login,
            reason: format!("login returned {}", login.status),
        }
    }

    fn resolution_from_body(user: &UserSpec, stage: AuthStage, body: &str) -> Resolution {
        match extract_user_id(body) {
            Some(id) => {
                info!("User ID for {}: {}", user.email, id);
                Resolution::Resolved {
                    user: ResolvedUser {
                        id,
                        email: user.email.to_string(),
                    },
                    via: stage,
                }
            }
            None => Resolution::Failed {
                stage,
                reason: "no user id in response".to_string(),
            },
        }
    }

    pub async fn seed_posts<R: Rng + ?Sized>(
        &self,
        users: &[ResolvedUser],
        posts: &[Post],
        rng: &mut R,
    ) -> PhaseCounts {
        let mut counts = PhaseCounts::default();

        for post in posts {
            let Some(user) = users.choose(rng) else {
                counts.skipped += 1;
                continue;
            };

            match self.api.add_post(post, &user.id).await {
                Ok(response) if response.is_success() => {
                    info!("Created post: {}...", preview(&post.title, 30));
                    counts.created += 1;
                }
                Ok(response) => {
                    warn!("Failed to create post: {}", response.body);
                    counts.failed += 1;
                }
                Err(e) => {
                    error!("Error creating post: {}", e);
                    counts.failed += 1;
                }
            }

            pace(self.pacing.after_post).await;
        }

        counts
    }

    pub async fn seed_queries<R: Rng + ?Sized>(
        &self,
        users: &[ResolvedUser],
        queries: Vec<Query>,
        rng: &mut R,
    ) -> PhaseCounts {
        let mut counts = PhaseCounts::default();

        for mut query in queries {
            let Some(user) = users.choose(rng) else {
                counts.skipped += 1;
                continue;
            };
            query.user_mail = user.email.clone();

            match self.api.add_query(&query).await {
                Ok(response) if response.is_success() => {
                    info!("Created query for {}", query.department);
                    counts.created += 1;
                }
                Ok(response) => {
                    warn!("Failed to create query: {}", response.body);
                    counts.failed += 1;
                }
                Err(e) => {
                    error!("Error creating query: {}", e);
                    counts.failed += 1;
                }
            }

            pace(self.pacing.after_query).await;
        }

        counts
    }

    /// Send each pair as an opening message and, only if that succeeds, a
    /// reply with sender and receiver swapped.
    pub async fn seed_messages<R: Rng + ?Sized>(
        &self,
        users: &[ResolvedUser],
        pairs: &[MessagePair],
        rng: &mut R,
    ) -> PhaseCounts {
        let mut counts = PhaseCounts::default();

        if users.len() < 2 {
            warn!(
                "Need at least two users to exchange messages, skipping {} conversations",
                pairs.len()
            );
            counts.skipped = pairs.len();
            return counts;
        }

        for pair in pairs {
            let (sender, receiver) = match select_pair(users, rng) {
                PairSelection::Pair { sender, receiver } => (sender, receiver),
                PairSelection::NotEnoughUsers => {
                    warn!("No receiver with a distinct id, skipping conversation");
                    counts.skipped += 1;
                    continue;
                }
            };

            match self.api.send_message(&sender.id, &receiver.id, &pair.initial).await {
                Ok(response) if response.is_success() => {
                    info!("Sent message from {} to {}", sender.email, receiver.email);
                    counts.created += 1;

                    match self
                        .api
                        .send_message(&receiver.id, &sender.id, &pair.response)
                        .await
                    {
                        Ok(reply) if reply.is_success() => {
                            info!(
                                "Sent response message from {} to {}",
                                receiver.email, sender.email
                            );
                            counts.created += 1;
                        }
                        Ok(reply) => {
                            warn!("Failed to send response message: {}", reply.body);
                            counts.failed += 1;
                        }
                        Err(e) => {
                            error!("Error creating message conversation: {}", e);
                            counts.failed += 1;
                        }
                    }
                }
                Ok(response) => {
                    warn!("Failed to send initial message: {}", response.body);
                    counts.failed += 1;
                }
                Err(e) => {
                    error!("Error creating message conversation: {}", e);
                    counts.failed += 1;
                }
            }

            pace(self.pacing.after_message_pair).await;
        }

        counts
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
