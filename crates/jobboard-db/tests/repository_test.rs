use anyhow::Result;
use jobboard_db::{
    Database, DbError, JobQuery, NewApplication, NewJob, NewUser, UpdateJob, UpdateProfile,
    UserRole, UserType,
};
use tempfile::TempDir;

async fn setup() -> Result<(Database, TempDir)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("jobboard.db");
    let db = Database::new(&format!("sqlite:{}?mode=rwc", path.display())).await?;
    Ok((db, dir))
}

fn new_user(email: &str, user_type: UserType) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: "hash".to_string(),
        role: UserRole::User,
        user_type,
    }
}

fn new_job(title: &str, owner_user_id: i64) -> NewJob {
    NewJob {
        title: title.to_string(),
        description: format!("{} description", title),
        location: Some("Remote".to_string()),
        company: Some("Acme".to_string()),
        owner_user_id,
    }
}

#[tokio::test]
async fn test_insert_and_lookup_user_case_insensitive() -> Result<()> {
    let (db, _dir) = setup().await?;

    let user = db.insert_user(new_user("Alice@Example.com", UserType::Recruiter)).await?;
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, UserRole::User);

    let found = db.get_user_by_email("ALICE@example.COM").await?.unwrap();
    assert_eq!(found.id, user.id);
    assert_eq!(found.user_type, UserType::Recruiter);

    let by_id = db.get_user_by_id(user.id).await?.unwrap();
    assert_eq!(by_id.email, "alice@example.com");
    assert!(db.has_users().await?);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_rejected() -> Result<()> {
    let (db, _dir) = setup().await?;

    db.insert_user(new_user("a@x.com", UserType::Jobseeker)).await?;
    let result = db.insert_user(new_user("A@X.COM", UserType::Recruiter)).await;
    assert!(matches!(result, Err(DbError::Duplicate(_))));
    Ok(())
}

#[tokio::test]
async fn test_update_profile_partial() -> Result<()> {
    let (db, _dir) = setup().await?;
    let user = db.insert_user(new_user("a@x.com", UserType::Jobseeker)).await?;
    db.insert_user(new_user("taken@x.com", UserType::Jobseeker)).await?;

    let updated = db
        .update_user_profile(
            user.id,
            UpdateProfile {
                name: Some("Alice".to_string()),
                bio: Some("Rustacean".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();
    assert_eq!(updated.name.as_deref(), Some("Alice"));
    assert_eq!(updated.bio.as_deref(), Some("Rustacean"));
    assert_eq!(updated.phone, None);
    assert_eq!(updated.email, "a@x.com");

    // Untouched fields survive a second update
    let updated = db
        .update_user_profile(
            user.id,
            UpdateProfile {
                phone: Some("555-0100".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();
    assert_eq!(updated.name.as_deref(), Some("Alice"));
    assert_eq!(updated.phone.as_deref(), Some("555-0100"));

    let clash = db
        .update_user_profile(
            user.id,
            UpdateProfile {
                email: Some("Taken@X.com".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(clash, Err(DbError::Duplicate(_))));

    // Re-submitting your own address is not a clash
    let same = db
        .update_user_profile(
            user.id,
            UpdateProfile {
                email: Some("A@x.com".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();
    assert_eq!(same.email, "a@x.com");
    assert_eq!(same.name.as_deref(), Some("Alice"));

    assert!(db.update_user_profile(9999, UpdateProfile::default()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_job_crud() -> Result<()> {
    let (db, _dir) = setup().await?;
    let owner = db.insert_user(new_user("r@x.com", UserType::Recruiter)).await?;

    let job = db.insert_job(new_job("Rust Engineer", owner.id)).await?;
    assert_eq!(job.owner_user_id, owner.id);

    let fetched = db.get_job(job.id).await?.unwrap();
    assert_eq!(fetched.title, "Rust Engineer");

    let updated = db
        .update_job(
            job.id,
            UpdateJob {
                title: Some("Senior Rust Engineer".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();
    assert_eq!(updated.title, "Senior Rust Engineer");
    assert_eq!(updated.company.as_deref(), Some("Acme"));

    assert!(db.delete_job(job.id).await?);
    assert!(db.get_job(job.id).await?.is_none());
    assert!(!db.delete_job(job.id).await?);
    assert!(db.update_job(job.id, UpdateJob::default()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_concurrent_partial_job_updates_both_apply() -> Result<()> {
    let (db, _dir) = setup().await?;
    let owner = db.insert_user(new_user("r@x.com", UserType::Recruiter)).await?;
    let job = db.insert_job(new_job("Rust Engineer", owner.id)).await?;

    for round in 0..10 {
        let title = format!("Rust Engineer {}", round);
        let company = format!("Acme {}", round);
        let (first, second) = tokio::join!(
            db.update_job(
                job.id,
                UpdateJob {
                    title: Some(title.clone()),
                    ..Default::default()
                },
            ),
            db.update_job(
                job.id,
                UpdateJob {
                    company: Some(company.clone()),
                    ..Default::default()
                },
            ),
        );
        assert!(first?.is_some());
        assert!(second?.is_some());

        let stored = db.get_job(job.id).await?.unwrap();
        assert_eq!(stored.title, title);
        assert_eq!(stored.company.as_deref(), Some(company.as_str()));
        assert_eq!(stored.location.as_deref(), Some("Remote"));
    }
    Ok(())
}

#[tokio::test]
async fn test_list_jobs_search_and_owner_filter() -> Result<()> {
    let (db, _dir) = setup().await?;
    let first = db.insert_user(new_user("one@x.com", UserType::Recruiter)).await?;
    let second = db.insert_user(new_user("two@x.com", UserType::Recruiter)).await?;

    db.insert_job(new_job("Frontend React Developer", first.id)).await?;
    db.insert_job(new_job("Backend Engineer", first.id)).await?;
    let mut devops = new_job("DevOps Engineer", second.id);
    devops.location = Some("Austin, TX".to_string());
    db.insert_job(devops).await?;

    let all = db.list_jobs(JobQuery::default()).await?;
    assert_eq!(all.len(), 3);
    // Newest first
    assert_eq!(all[0].title, "DevOps Engineer");

    let engineers = db
        .list_jobs(JobQuery {
            search: Some("engineer".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(engineers.len(), 2);

    let austin = db
        .list_jobs(JobQuery {
            search: Some("AUSTIN".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(austin.len(), 1);

    let mine = db
        .list_jobs(JobQuery {
            search: Some("engineer".to_string()),
            owner_user_id: Some(first.id),
        })
        .await?;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].title, "Backend Engineer");

    // LIKE wildcards in the search term are literal
    let wildcard = db
        .list_jobs(JobQuery {
            search: Some("%".to_string()),
            ..Default::default()
        })
        .await?;
    assert!(wildcard.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_applications_follow_their_job() -> Result<()> {
    let (db, _dir) = setup().await?;
    let owner = db.insert_user(new_user("r@x.com", UserType::Recruiter)).await?;
    let job = db.insert_job(new_job("Data Scientist", owner.id)).await?;

    let application = db
        .insert_application(NewApplication {
            job_id: job.id,
            applicant_name: "Sam".to_string(),
            applicant_email: "sam@x.com".to_string(),
            resume_link: Some("https://example.com/cv.pdf".to_string()),
            user_id: None,
        })
        .await?;
    assert_eq!(application.job_id, job.id);

    let listed = db.list_applications_for_job(job.id).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].applicant_name, "Sam");

    let missing = db
        .insert_application(NewApplication {
            job_id: 9999,
            applicant_name: "Sam".to_string(),
            applicant_email: "sam@x.com".to_string(),
            resume_link: None,
            user_id: None,
        })
        .await;
    assert!(matches!(missing, Err(DbError::NotFound(_))));

    db.delete_job(job.id).await?;
    assert!(db.list_applications_for_job(job.id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_reset_clears_everything() -> Result<()> {
    let (db, _dir) = setup().await?;
    let owner = db.insert_user(new_user("r@x.com", UserType::Recruiter)).await?;
    db.insert_job(new_job("Product Manager", owner.id)).await?;

    db.reset().await?;
    assert!(!db.has_users().await?);
    assert!(db.list_jobs(JobQuery::default()).await?.is_empty());

    // Ids restart after a reset
    let user = db.insert_user(new_user("r@x.com", UserType::Recruiter)).await?;
    assert_eq!(user.id, 1);
    Ok(())
}
