use crate::github::GithubClient;
use crate::policy::ReportPolicy;
use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "orgstats")]
#[command(about = "Report external contributors to a GitHub organization between two release tags")]
#[command(version)]
pub struct Cli {
    #[arg(short = 's', long, help = "Tag marking the start of the report window")]
    pub start_tag: String,

    #[arg(short = 'e', long, help = "Tag marking the end of the report window (defaults to now)")]
    pub end_tag: Option<String>,

    #[arg(short = 'v', long, help = "Append per-repository counts to each contributor")]
    pub verbose: bool,

    #[arg(short = 't', long, help = "GitHub access token (falls back to GITHUB_TOKEN)")]
    pub token: Option<String>,

    #[arg(long, help = "Organization to report on")]
    pub org: Option<String>,

    #[arg(long, help = "Repository whose tags mark the release boundaries")]
    pub main_repo: Option<String>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let mut policy = ReportPolicy::discourse();
        if let Some(org) = self.org {
            policy.org = org;
        }
        if let Some(main_repo) = self.main_repo {
            policy.main_repo = main_repo;
        }

        let token = self
            .token
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .filter(|t| !t.is_empty());
        let client = GithubClient::new(token)?;

        crate::report::exec(
            &client,
            &policy,
            &self.start_tag,
            self.end_tag.as_deref(),
            self.verbose,
        )
    }
}
