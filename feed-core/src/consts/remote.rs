pub const AGENT_URL: &str = "https://ic0.app";
