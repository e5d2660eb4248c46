mod git_command;
mod openai_http;
mod system_clock;

pub use git_command::GitCommandDriver;
pub use openai_http::HttpContentGenerator;
pub use system_clock::SystemClock;
