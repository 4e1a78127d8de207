use anyhow::Result;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let output_path = onboarding_audit::presentation::http::openapi::write_openapi_snapshot()?;
    println!("OpenAPI snapshot written to {output_path}");
    Ok(())
}
