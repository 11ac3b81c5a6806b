//! Shared menu configuration and the authorization predicate.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use twilight_model::id::{
    Id,
    marker::{RoleMarker, UserMarker},
};

use crate::DEFAULT_TIMEOUT_SECS;
use crate::client::ChatClient;
use crate::event::Actor;
use crate::waiter::EventWaiter;

/// Immutable configuration shared by every menu variant.
///
/// Created once per command invocation and handed to a menu constructor.
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct MenuConfig {
    waiter: EventWaiter,
    client: Arc<dyn ChatClient>,
    timeout: Duration,
    authorized_users: HashSet<Id<UserMarker>>,
    authorized_roles: HashSet<Id<RoleMarker>>,
}

impl MenuConfig {
    /// New config with the default timeout and no principal restrictions.
    pub fn new(waiter: EventWaiter, client: Arc<dyn ChatClient>) -> Self {
        Self {
            waiter,
            client,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            authorized_users: HashSet::new(),
            authorized_roles: HashSet::new(),
        }
    }

    /// Override the per-input wait window.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Authorize a specific user.
    pub fn allow_user(mut self, user_id: Id<UserMarker>) -> Self {
        self.authorized_users.insert(user_id);
        self
    }

    /// Authorize a set of users.
    pub fn allow_users(mut self, user_ids: impl IntoIterator<Item = Id<UserMarker>>) -> Self {
        self.authorized_users.extend(user_ids);
        self
    }

    /// Authorize holders of a guild role.
    pub fn allow_role(mut self, role_id: Id<RoleMarker>) -> Self {
        self.authorized_roles.insert(role_id);
        self
    }

    /// Authorize holders of any of a set of guild roles.
    pub fn allow_roles(mut self, role_ids: impl IntoIterator<Item = Id<RoleMarker>>) -> Self {
        self.authorized_roles.extend(role_ids);
        self
    }

    pub fn waiter(&self) -> &EventWaiter {
        &self.waiter
    }

    pub fn client(&self) -> &Arc<dyn ChatClient> {
        &self.client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether an actor's input may affect menu state.
    ///
    /// Bot-authored input is always rejected. With no users or roles
    /// configured, any non-bot actor qualifies. Otherwise the actor must be
    /// an authorized user, or hold an authorized role while acting within a
    /// guild.
    pub fn is_authorized(&self, actor: &Actor) -> bool {
        if actor.is_bot {
            return false;
        }

        if self.authorized_users.is_empty() && self.authorized_roles.is_empty() {
            return true;
        }

        if self.authorized_users.contains(&actor.user_id) {
            return true;
        }

        actor.guild_id.is_some()
            && actor
                .roles
                .iter()
                .any(|role| self.authorized_roles.contains(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::NoopChatClient;

    fn open_config() -> MenuConfig {
        MenuConfig::new(EventWaiter::new(), Arc::new(NoopChatClient))
    }

    #[test]
    fn bots_are_always_rejected() {
        let config = open_config();
        let mut bot = Actor::user(Id::new(1));
        bot.is_bot = true;
        assert!(!config.is_authorized(&bot));
    }

    #[test]
    fn empty_sets_authorize_any_non_bot() {
        let config = open_config();
        assert!(config.is_authorized(&Actor::user(Id::new(1))));
        assert!(config.is_authorized(&Actor::user(Id::new(999))));
    }

    #[test]
    fn listed_user_is_authorized_and_others_are_not() {
        let config = open_config().allow_user(Id::new(5));
        assert!(config.is_authorized(&Actor::user(Id::new(5))));
        assert!(!config.is_authorized(&Actor::user(Id::new(6))));
    }

    #[test]
    fn role_match_requires_guild_context() {
        let config = open_config().allow_role(Id::new(77));

        let mut actor = Actor::user(Id::new(5));
        actor.roles = vec![Id::new(77)];
        assert!(!config.is_authorized(&actor), "no guild context");

        actor.guild_id = Some(Id::new(3));
        assert!(config.is_authorized(&actor));

        actor.roles = vec![Id::new(78)];
        assert!(!config.is_authorized(&actor), "wrong role");
    }

    #[test]
    fn user_listing_works_without_guild_context() {
        let config = open_config()
            .allow_user(Id::new(5))
            .allow_role(Id::new(77));
        assert!(config.is_authorized(&Actor::user(Id::new(5))));
    }
}
