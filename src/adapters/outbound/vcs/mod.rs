mod git_client;

pub use git_client::GitCli;
