use std::sync::Arc;

use ic_agent::{Agent, AgentError, Identity};

/// Agent bound to a single identity.
///
/// Each scoped call gets its own agent so a delegated identity
/// never outlives the interaction it was minted for.
pub struct AgentWrapper(Agent);

impl AgentWrapper {
    pub async fn build(url: &str, identity: Arc<dyn Identity>) -> Result<Self, AgentError> {
        let agent = Agent::builder()
            .with_url(url)
            .with_arc_identity(identity)
            .build()?;

        #[cfg(feature = "local")]
        agent.fetch_root_key().await?;

        Ok(Self(agent))
    }

    pub fn get_agent(&self) -> &Agent {
        &self.0
    }
}
