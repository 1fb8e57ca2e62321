use std::path::Path;

use crate::core::load_conf;
use crate::error::PpcliError;
use crate::models::Conf;

/// Print job names, one per line, or the whole job set as JSON
pub fn list_jobs(config: &Path, json: bool) -> Result<(), PpcliError> {
    let conf = load_conf(config)?;
    println!("{}", render_jobs(&conf, json)?);
    Ok(())
}

fn render_jobs(conf: &Conf, json: bool) -> Result<String, PpcliError> {
    if json {
        return Ok(serde_json::to_string_pretty(&conf.jobs)?);
    }
    Ok(conf.job_names().join("\n"))
}
