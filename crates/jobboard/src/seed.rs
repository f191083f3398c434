//! Sample data for local development

use anyhow::Result;
use jobboard_auth::hash_password;
use jobboard_db::{Database, NewJob, NewUser, UserRole, UserType};
use tracing::info;

pub const SAMPLE_PASSWORD: &str = "password123";

/// Whose account a sample job is posted under
#[derive(Clone, Copy)]
enum Poster {
    Admin,
    Recruiter,
}

struct SampleJob {
    title: &'static str,
    description: &'static str,
    location: &'static str,
    company: &'static str,
    poster: Poster,
}

const SAMPLE_JOBS: &[SampleJob] = &[
    SampleJob {
        title: "Senior Full Stack Developer",
        description: "We are looking for an experienced Full Stack Developer to join our dynamic team. You will be responsible for developing and maintaining web applications using modern technologies.",
        location: "San Francisco, CA",
        company: "TechCorp Inc.",
        poster: Poster::Recruiter,
    },
    SampleJob {
        title: "Frontend React Developer",
        description: "Join our team as a React Developer! Build beautiful, responsive user interfaces and work with cutting-edge technologies.",
        location: "Remote",
        company: "WebDev Solutions",
        poster: Poster::Recruiter,
    },
    SampleJob {
        title: "Backend Node.js Engineer",
        description: "Seeking a talented Backend Engineer with Node.js expertise. Design and implement scalable APIs and microservices.",
        location: "New York, NY",
        company: "CloudTech Systems",
        poster: Poster::Admin,
    },
    SampleJob {
        title: "DevOps Engineer",
        description: "Help us build and maintain our cloud infrastructure. Experience with AWS, Docker, and Kubernetes required.",
        location: "Austin, TX",
        company: "Infrastructure Pro",
        poster: Poster::Admin,
    },
    SampleJob {
        title: "UI/UX Designer",
        description: "Creative UI/UX Designer needed to craft amazing user experiences. Strong portfolio and Figma skills required.",
        location: "Los Angeles, CA",
        company: "Design Studio",
        poster: Poster::Recruiter,
    },
    SampleJob {
        title: "Data Scientist",
        description: "Analyze large datasets and build machine learning models to drive business insights.",
        location: "Boston, MA",
        company: "DataTech Analytics",
        poster: Poster::Admin,
    },
    SampleJob {
        title: "Mobile App Developer",
        description: "Develop native and cross-platform mobile applications using React Native or Flutter.",
        location: "Seattle, WA",
        company: "MobileFirst Apps",
        poster: Poster::Recruiter,
    },
    SampleJob {
        title: "Product Manager",
        description: "Lead product development from concept to launch. Define roadmaps and work with cross-functional teams.",
        location: "Remote",
        company: "Innovation Labs",
        poster: Poster::Admin,
    },
];

/// Wipe every table and insert the sample accounts and jobs
pub async fn seed(db: &Database) -> Result<()> {
    db.reset().await?;

    // One hash is enough, all sample accounts share the password
    let password_hash = hash_password(SAMPLE_PASSWORD)?;
    let new_user = |email: &str, role, user_type| NewUser {
        email: email.to_string(),
        password_hash: password_hash.clone(),
        role,
        user_type,
    };

    let admin = db
        .insert_user(new_user("admin@jobboard.com", UserRole::Admin, UserType::Recruiter))
        .await?;
    info!("Created admin user {} (recruiter)", admin.email);

    let recruiter = db
        .insert_user(new_user("recruiter@jobboard.com", UserRole::User, UserType::Recruiter))
        .await?;
    info!("Created recruiter user {}", recruiter.email);

    let jobseeker = db
        .insert_user(new_user("jobseeker@jobboard.com", UserRole::User, UserType::Jobseeker))
        .await?;
    info!("Created jobseeker user {}", jobseeker.email);

    for sample in SAMPLE_JOBS {
        let owner_user_id = match sample.poster {
            Poster::Admin => admin.id,
            Poster::Recruiter => recruiter.id,
        };
        db.insert_job(NewJob {
            title: sample.title.to_string(),
            description: sample.description.to_string(),
            location: Some(sample.location.to_string()),
            company: Some(sample.company.to_string()),
            owner_user_id,
        })
        .await?;
    }

    info!("Created {} sample jobs", SAMPLE_JOBS.len());
    info!(
        "Sample login: {} / {}",
        admin.email, SAMPLE_PASSWORD
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_auth::verify_password;
    use jobboard_db::JobQuery;
    use tempfile::TempDir;

    async fn create_test_db() -> (Database, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seed.db");
        let db = Database::new(&format!("sqlite:{}?mode=rwc", path.display()))
            .await
            .unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn test_seed_inserts_sample_data() {
        let (db, _dir) = create_test_db().await;
        seed(&db).await.unwrap();

        let users = db.list_users().await.unwrap();
        assert_eq!(users.len(), 3);

        let admin = db
            .get_user_by_email("admin@jobboard.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert_eq!(admin.user_type, UserType::Recruiter);
        assert!(verify_password(SAMPLE_PASSWORD, &admin.password_hash).unwrap());

        let jobs = db.list_jobs(JobQuery::default()).await.unwrap();
        assert_eq!(jobs.len(), 8);

        let admin_jobs = db
            .list_jobs(JobQuery {
                owner_user_id: Some(admin.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(admin_jobs.len(), 4);
    }

    #[tokio::test]
    async fn test_seed_twice_replaces_data() {
        let (db, _dir) = create_test_db().await;
        seed(&db).await.unwrap();
        seed(&db).await.unwrap();

        assert_eq!(db.list_users().await.unwrap().len(), 3);
        assert_eq!(db.list_jobs(JobQuery::default()).await.unwrap().len(), 8);
        let admin = db
            .get_user_by_email("admin@jobboard.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.id, 1);
    }
}
