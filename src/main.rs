use anyhow::{Context, Result};
use docversion::config::Config;
use docversion::duplicate::has_duplicate;
use docversion::{
    compute_hash, extract_version, get_metadata, CatalogStore, FileRecord, FsStat, HashAlgorithm,
    VersionResolver,
};
use log::{error, info};
use std::env;
use std::path::{Path, PathBuf};

const USAGE: &str = "Usage:
  docversion hash <path> [md5|sha1|sha256]
  docversion metadata <folder> <file>
  docversion check <folder> <file>
  docversion version <file>
  docversion versions <folder> <file>
  docversion register <folder> <file>";

fn main() {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let command = args.first().map(String::as_str).unwrap_or_default();

    match (command, &args[1.min(args.len())..]) {
        ("hash", [path]) => hash(Path::new(path), HashAlgorithm::default()),
        ("hash", [path, algorithm]) => hash(Path::new(path), algorithm.parse()?),
        ("metadata", [folder, file]) => metadata(&get_folder(folder)?, file),
        ("check", [folder, file]) => check(&get_folder(folder)?, file),
        ("version", [file]) => {
            println!("{}", extract_version(file));
            Ok(())
        }
        ("versions", [folder, file]) => versions(&get_folder(folder)?, file),
        ("register", [folder, file]) => register(&get_folder(folder)?, file),
        _ => anyhow::bail!("Invalid arguments\n{}", USAGE),
    }
}

fn get_folder(arg: &str) -> Result<PathBuf> {
    let path = PathBuf::from(arg);
    if path.exists() && path.is_dir() {
        Ok(path)
    } else {
        anyhow::bail!("Provided path is not a valid directory: {:?}", path);
    }
}

fn resolver(config: &Config) -> Result<VersionResolver<CatalogStore, FsStat>> {
    let catalog = config.catalog_path()?;
    info!("Using catalog {:?}", catalog);
    Ok(VersionResolver::new(CatalogStore::new(catalog), FsStat))
}

fn hash(path: &Path, algorithm: HashAlgorithm) -> Result<()> {
    let digest = compute_hash(path, algorithm)?;
    println!("{}  {}", digest, path.display());
    Ok(())
}

fn metadata(folder: &Path, file: &str) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let meta = get_metadata(file, folder, config.hashing.algorithm, &FsStat)?;
    println!("{}", serde_json::to_string_pretty(&meta)?);
    Ok(())
}

fn check(folder: &Path, file: &str) -> Result<()> {
    match has_duplicate(file, folder)? {
        Some(message) => println!("{}", message),
        None => println!("No duplicate for {} in {}", file, folder.display()),
    }
    Ok(())
}

fn versions(folder: &Path, file: &str) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let listing = resolver(&config)?.list_versioned_files(file, folder)?;

    if listing.versions.is_none() {
        info!("{} starts a new document family", file);
    }
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

fn register(folder: &Path, file: &str) -> Result<()> {
    if !folder.join(file).is_file() {
        anyhow::bail!("{} is not a file in {:?}", file, folder);
    }

    let config = Config::load().context("Failed to load configuration")?;
    let resolver = resolver(&config)?;
    let resolution = resolver.resolve(file)?;

    resolver
        .store()
        .append(FileRecord::new(file, resolution.category))
        .context("Failed to register file")?;

    println!(
        "{} registered under category {} (version {})",
        file,
        resolution.category,
        extract_version(file)
    );
    Ok(())
}
