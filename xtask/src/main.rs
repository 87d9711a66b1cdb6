use clap::Parser;
use std::path::{Path, PathBuf};

mod cli;

const BUNDLE_DIR: &str = "CoverLetter";

async fn run(cmd: &mut tokio::process::Command) -> Result<(), Box<dyn std::error::Error>> {
    let status = cmd.spawn()?.wait().await?;
    if !status.success() {
        return Err(format!("{:?} exited with {}", cmd.as_std(), status).into());
    }
    Ok(())
}

fn launcher_binary(target_triple: Option<&str>) -> PathBuf {
    let mut path = PathBuf::from("target");
    if let Some(triple) = target_triple {
        path.push(triple);
    }
    path.push("release");
    path.push(if cfg!(windows) { "launcher.exe" } else { "launcher" });
    path
}

async fn copy_dir(from: &Path, to: &Path) -> Result<(), Box<dyn std::error::Error>> {
    tokio::fs::create_dir_all(to).await?;
    let mut entries = tokio::fs::read_dir(from).await?;
    while let Some(entry) = entries.next_entry().await? {
        let target = to.join(entry.file_name());
        if entry.file_type().await?.is_dir() {
            Box::pin(copy_dir(&entry.path(), &target)).await?;
        } else {
            tokio::fs::copy(entry.path(), target).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Launch { port } => {
            let mut cmd = tokio::process::Command::new("trunk");
            cmd.current_dir(std::fs::canonicalize("frontend")?);
            cmd.arg("build");
            run(&mut cmd).await?;

            let mut cmd = tokio::process::Command::new("cargo");
            cmd.arg("run")
                .arg("--package")
                .arg("launcher")
                .arg("--")
                .arg("--dist-dir")
                .arg("frontend/dist")
                .arg("--port")
                .arg(port.to_string());
            run(&mut cmd).await?;

            Ok(())
        }
        cli::Command::Dist { target_triple } => {
            let mut cmd = tokio::process::Command::new("cargo");
            cmd.arg("build")
                .arg("--package")
                .arg("launcher")
                .arg("--release");
            if let Some(target_triple) = &target_triple {
                cmd.arg("--target").arg(target_triple);
            }
            run(&mut cmd).await?;

            let mut cmd = tokio::process::Command::new("trunk");
            cmd.current_dir(std::fs::canonicalize("frontend")?);
            cmd.arg("build").arg("--release");
            run(&mut cmd).await?;

            let bundle = Path::new(BUNDLE_DIR);
            tokio::fs::create_dir_all(bundle).await?;
            let binary = launcher_binary(target_triple.as_deref());
            let binary_name = binary.file_name().ok_or("launcher binary has no file name")?;
            tokio::fs::copy(&binary, bundle.join(binary_name)).await?;
            copy_dir(Path::new("frontend/dist"), &bundle.join("dist")).await?;

            println!("Bundle written to {}", bundle.display());
            Ok(())
        }
    }
}
