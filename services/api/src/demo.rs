use crate::infra::PortalServices;
use chrono::{Local, NaiveDate};
use clap::Args;
use job_portal::config::AdminConfig;
use job_portal::error::AppError;
use job_portal::store::InMemoryRecordStore;
use job_portal::workflows::accounts::{EmployerRegistration, ResumeBlob, SeekerRegistration};
use job_portal::workflows::applications::{ApplicationWorkflow, InterviewRequest};
use job_portal::workflows::jobs::NewJobPosting;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Seeker email used for the walkthrough
    #[arg(long, default_value = "alice@example.com")]
    pub(crate) seeker: String,
    /// Employer email used for the walkthrough
    #[arg(long, default_value = "hiring@acme.example")]
    pub(crate) employer: String,
    /// Interview date (YYYY-MM-DD). Defaults to three days from today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) interview_date: Option<NaiveDate>,
    /// Print every intermediate record as JSON.
    #[arg(long)]
    pub(crate) json: bool,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        seeker,
        employer,
        interview_date,
        json,
    } = args;
    let interview_date =
        interview_date.unwrap_or_else(|| Local::now().date_naive() + chrono::Duration::days(3));

    let services = PortalServices::new(
        Arc::new(InMemoryRecordStore::default()),
        AdminConfig::disabled(),
    );
    let workflow = services.applications.clone();

    println!("Job portal application workflow demo");

    let company = services
        .accounts
        .register_employer(EmployerRegistration {
            company: Some("Acme".to_string()),
            email: Some(employer.clone()),
            password: Some("demo-password".to_string()),
        })?;
    println!("- Employer {} registered ({})", company.email, company.id);

    let job = services.jobs.post(NewJobPosting {
        title: Some("Backend Engineer".to_string()),
        company: Some("Acme".to_string()),
        location: Some("Remote".to_string()),
        job_type: Some("Full-time".to_string()),
        salary: Some("120k".to_string()),
        description: Some("Own the hiring pipeline services".to_string()),
        posted_by: Some(employer.clone()),
    })?;
    println!("- Job {} posted: {}", job.id, job.title);

    services.accounts.register_seeker(
        SeekerRegistration {
            name: Some("Alice".to_string()),
            email: Some(seeker.clone()),
            password: Some("demo-password".to_string()),
            age: Some(29),
            location: Some("Lisbon".to_string()),
            linkedin: None,
            bio: Some("Rust and distributed systems".to_string()),
        },
        Some(ResumeBlob {
            data: b"%PDF-1.7 demo resume".to_vec(),
            content_type: "application/pdf".to_string(),
            file_name: "alice.pdf".to_string(),
        }),
    )?;
    println!("- Seeker {seeker} registered with resume");

    let application = workflow.apply(job.id.as_str(), &seeker)?;
    println!("- Applied: {} -> {}", application.id, application.status);
    match workflow.apply(job.id.as_str(), &seeker) {
        Ok(_) => println!("  Duplicate apply unexpectedly accepted"),
        Err(err) => println!("  Duplicate apply refused: {err}"),
    }

    let interview = |message: &str| InterviewRequest {
        job_id: Some(job.id.to_string()),
        seeker_email: Some(seeker.clone()),
        interview_date: Some(interview_date.format("%Y-%m-%d").to_string()),
        interview_time: Some("10:00".to_string()),
        mode: Some("Online".to_string()),
        link: Some("https://meet.example/portal-demo".to_string()),
        message: Some(message.to_string()),
    };

    let scheduled = workflow.schedule_interview(interview("First round"))?;
    println!(
        "- Interview {} on {} at {} (application updated: {})",
        scheduled.interview.id,
        scheduled.interview.date,
        scheduled.interview.time,
        scheduled.application_updated
    );
    print_status(&workflow, &seeker, json)?;

    let rejected = workflow.reject(job.id.as_str(), &seeker)?;
    println!("- Employer rejected applicant -> {}", rejected.status);

    let reinvited = workflow.schedule_interview(interview("Second look"))?;
    println!(
        "- Re-invited: interview {} (application updated: {})",
        reinvited.interview.id, reinvited.application_updated
    );
    print_status(&workflow, &seeker, json)?;

    println!(
        "- Interviews pending for {}: {}",
        employer,
        workflow.interview_count_for_employer(&employer)?
    );

    workflow.withdraw(job.id.as_str(), &seeker)?;
    println!(
        "- Seeker withdrew; {} application(s) remain, {} interview record(s) retained",
        workflow.applications_for_seeker(&seeker)?.len(),
        workflow.interviews_for_seeker(&seeker)?.len()
    );

    Ok(())
}

fn print_status(
    workflow: &ApplicationWorkflow<InMemoryRecordStore>,
    seeker: &str,
    json: bool,
) -> Result<(), AppError> {
    for view in workflow.applications_for_seeker(seeker)? {
        println!("  {} @ {}: {}", view.job.title, view.job.company, view.status);
        if json {
            match serde_json::to_string_pretty(&view) {
                Ok(payload) => println!("{payload}"),
                Err(err) => println!("  Payload unavailable: {err}"),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_runs_against_in_memory_store() {
        run_demo(DemoArgs {
            seeker: "demo-seeker@example.com".to_string(),
            employer: "demo-employer@example.com".to_string(),
            interview_date: NaiveDate::from_ymd_opt(2025, 5, 1),
            json: false,
        })
        .expect("demo completes");
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("2025-05-01").is_ok());
        assert!(parse_date("05/01/2025").is_err());
    }
}
