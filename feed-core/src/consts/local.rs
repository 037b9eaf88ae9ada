pub const AGENT_URL: &str = "http://localhost:4943";
