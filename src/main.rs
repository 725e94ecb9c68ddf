use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use clap::Parser;
use meme_search::{
    build_rocket,
    client::{DEFAULT_UPSTREAM, HttpSearchClient},
    lets_encrypt_listener::{AcmeSettings, LetsEncryptListener},
};

/// Search page for images and memes.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    address: IpAddr,

    /// Port to listen on (443 is a good choice with --acme-domain)
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Base URL of the search provider
    #[arg(long, default_value = DEFAULT_UPSTREAM)]
    upstream: String,

    /// Seconds to wait for the search provider
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Directory holding the stylesheet and emoji
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Serve HTTPS for this domain with a Let's Encrypt certificate
    #[arg(long)]
    acme_domain: Option<String>,

    /// Contact email given to Let's Encrypt
    #[arg(long, requires = "acme_domain")]
    acme_contact: Option<String>,

    /// Where issued certificates are kept between restarts
    #[arg(long, default_value = "lets_encrypt_cache")]
    acme_cache: PathBuf,
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let client = HttpSearchClient::new(&args.upstream, Duration::from_secs(args.timeout_secs))?;
    let figment = rocket::Config::figment()
        .merge(("address", args.address))
        .merge(("port", args.port));
    let rocket = build_rocket(figment, Box::new(client), args.assets);

    match args.acme_domain {
        Some(domain) => {
            let listener = LetsEncryptListener::bind(AcmeSettings {
                address: SocketAddr::new(args.address, args.port),
                domain,
                contact: args.acme_contact,
                cache: args.acme_cache,
            })
            .await?;
            rocket.launch_on(listener).await?;
        }
        None => {
            rocket.launch().await?;
        }
    }

    Ok(())
}
