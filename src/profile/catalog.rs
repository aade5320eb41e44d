//! Profile lookup by id with default-profile fallback.

use tracing::debug;

use crate::host::HostClassification;
use crate::tree::Task;

use super::builtins::{self, builtin_profiles, is_builtin_id};
use super::{resolve, Profile};

/// Built-in plus user profiles, and the configured default.
#[derive(Debug, Clone)]
pub struct ProfileCatalog {
    builtins: Vec<Profile>,
    user: Vec<Profile>,
    default_profile: Option<String>,
}

impl Default for ProfileCatalog {
    fn default() -> Self {
        Self::new(Vec::new(), None)
    }
}

impl ProfileCatalog {
    /// Build a catalog. User entries reusing a built-in id are dropped.
    pub fn new(user: Vec<Profile>, default_profile: Option<String>) -> Self {
        let user = user
            .into_iter()
            .filter(|profile| !is_builtin_id(&profile.id))
            .map(|profile| Profile {
                builtin: false,
                ..profile
            })
            .collect();
        Self {
            builtins: builtin_profiles(),
            user,
            default_profile: default_profile
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty()),
        }
    }

    /// Look up a profile by id.
    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.builtins
            .iter()
            .chain(self.user.iter())
            .find(|profile| profile.id == id)
    }

    /// All profiles, built-ins first.
    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.builtins.iter().chain(self.user.iter())
    }

    pub fn default_profile_id(&self) -> Option<&str> {
        self.default_profile.as_deref()
    }

    /// Built-in inferred when nothing is configured for `host`.
    pub fn auto_default_id(host: HostClassification) -> &'static str {
        match host {
            HostClassification::NativePosix => builtins::NATIVE_BASH,
            HostClassification::HostedInSubsystem
            | HostClassification::WindowsBridging
            | HostClassification::WindowsNative => builtins::POSIX_SUBSYSTEM,
        }
    }

    /// The auto-detected built-in profile for `host`.
    pub fn auto_default(&self, host: HostClassification) -> &Profile {
        let id = Self::auto_default_id(host);
        self.builtins
            .iter()
            .find(|profile| profile.id == id)
            .unwrap_or(&self.builtins[0])
    }

    /// Base profile for a task: its own reference, then the configured
    /// default, then the auto-detected built-in. Unknown ids fall through.
    pub fn base_for(&self, task: &Task, host: HostClassification) -> &Profile {
        let referenced = task.profile_id.as_deref().and_then(|id| {
            let found = self.get(id);
            if found.is_none() {
                debug!(task = %task.id, profile = id, "task references unknown profile");
            }
            found
        });
        referenced
            .or_else(|| self.default_profile.as_deref().and_then(|id| self.get(id)))
            .unwrap_or_else(|| self.auto_default(host))
    }

    /// Effective profile for a task after applying its overrides.
    pub fn resolved_for(&self, task: &Task, host: HostClassification) -> Profile {
        resolve(self.base_for(task, host), task.overrides.as_ref())
    }
}
