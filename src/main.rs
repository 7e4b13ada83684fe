use clap::{CommandFactory, Parser, Subcommand};

use fetch_auth::{
    authorization, config, AuthorizationOptions, Error, Fetch, RawAuthorizationOptions, Request,
};

#[derive(Parser)]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Authorization as JSON, e.g. '{"bearer":"abc123"}'. Overrides [authorization].
    #[arg(long)]
    auth: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send the configured request
    Fetch,
    /// Print the Authorization header that would be sent
    Header,
}

// `--auth` wins over the config file's [authorization] table.
fn authorization_options(
    args: &Args,
    config: Option<&config::Config>,
) -> Result<Option<AuthorizationOptions>, Error> {
    let raw: Option<RawAuthorizationOptions> = match &args.auth {
        Some(json) => Some(serde_json::from_str(json)?),
        None => config.and_then(|config| config.authorization.clone()),
    };

    Ok(raw.map(AuthorizationOptions::from))
}

async fn send<F: Fetch>(fetch: F, request: Request) -> Result<(), Error> {
    let response = fetch.fetch(request).await?;

    println!("{} {}", response.status, response.status_text);
    println!("{}", response.body);
    if !response.is_success() {
        log::warn!("Request failed with status {}", response.status);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let cli = Args::parse();
    log::debug!("{:?}", &cli.command);

    match &cli.command {
        Some(Commands::Fetch) => {
            let config = config::Config::read_from_toml_file(&cli.config)?;
            let request = config.request.to_request()?;
            let transport = config.request.transport();

            match authorization_options(&cli, Some(&config))? {
                Some(options) => send(authorization(transport, options), request).await?,
                None => {
                    log::info!("No authorization configured, sending request as is");
                    send(transport, request).await?;
                }
            }
        },
        Some(Commands::Header) => {
            let config = match cli.auth {
                Some(_) => None,
                None => Some(config::Config::read_from_toml_file(&cli.config)?),
            };
            let options = authorization_options(&cli, config.as_ref())?
                .ok_or_else(|| Error::MissingConfig("authorization".to_owned()))?;
            println!("Authorization: {}", options.header_value());
        }
        _ => {
            Args::command().print_help()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use fetch_auth::{BasicCredentials, BearerToken};

    use super::*;

    fn parse_config(source: &str) -> config::Config {
        config::Config::from_toml(source).unwrap()
    }

    const BASIC_CONFIG: &str = r#"
[request]
url = "https://api.example.com/"

[authorization]
username = "user"
password = "pass"
"#;

    #[test]
    fn test_auth_flag_overrides_config() {
        let args = Args::parse_from(["fetch_auth", "--auth", r#"{"bearer": "abc123"}"#, "fetch"]);
        let config = parse_config(BASIC_CONFIG);

        let options = authorization_options(&args, Some(&config)).unwrap();

        assert_eq!(options, Some(AuthorizationOptions::Bearer(BearerToken::new("abc123"))));
    }

    #[test]
    fn test_config_used_without_auth_flag() {
        let args = Args::parse_from(["fetch_auth", "fetch"]);
        let config = parse_config(BASIC_CONFIG);

        let options = authorization_options(&args, Some(&config)).unwrap();

        assert_eq!(
            options,
            Some(AuthorizationOptions::Basic(BasicCredentials::new("user", "pass")))
        );
    }

    #[test]
    fn test_no_authorization_anywhere() {
        let args = Args::parse_from(["fetch_auth", "header"]);
        let config = parse_config("[request]\nurl = \"https://api.example.com/\"\n");

        assert_eq!(authorization_options(&args, Some(&config)).unwrap(), None);
        assert_eq!(authorization_options(&args, None).unwrap(), None);
    }

    #[test]
    fn test_bad_auth_json() {
        let args = Args::parse_from(["fetch_auth", "--auth", "{bearer", "header"]);

        assert!(matches!(authorization_options(&args, None), Err(Error::Serde(_))));
    }
}
