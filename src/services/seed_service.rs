use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sqlx::types::Json;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::assessment::{
    AssessmentQuestion, AssessmentSection, ConditionOperator, ConditionalRule, QuestionType,
};
use crate::models::candidate::Stage;
use crate::models::job::JobStatus;
use crate::utils::{id, time};

#[derive(Debug, Clone)]
pub struct SeedProfile {
    pub candidates: usize,
    /// Fixed seed for a reproducible dataset.
    pub seed: Option<u64>,
}

impl Default for SeedProfile {
    fn default() -> Self {
        Self {
            candidates: 1000,
            seed: None,
        }
    }
}

struct SeedJob {
    title: &'static str,
    slug: &'static str,
    status: JobStatus,
    tags: &'static [&'static str],
    location: &'static str,
    salary: &'static str,
    description: &'static str,
    requirements: &'static [&'static str],
}

const SEED_JOBS: &[SeedJob] = &[
    SeedJob {
        title: "Senior Frontend Developer",
        slug: "senior-frontend-developer",
        status: JobStatus::Active,
        tags: &["React", "TypeScript", "Frontend", "Senior"],
        location: "Bangalore, India",
        salary: "₹15,00,000 - ₹25,00,000",
        description: "We are looking for an experienced Frontend Developer to join our team and help build amazing user experiences.",
        requirements: &["5+ years React experience", "TypeScript proficiency", "CSS/SCSS expertise", "Testing experience"],
    },
    SeedJob {
        title: "Backend Engineer",
        slug: "backend-engineer",
        status: JobStatus::Active,
        tags: &["Node.js", "Python", "Backend", "API"],
        location: "Mumbai, India",
        salary: "₹12,00,000 - ₹18,00,000",
        description: "Join our backend team to build scalable and robust server-side applications.",
        requirements: &["3+ years backend development", "Node.js or Python", "Database design", "API development"],
    },
    SeedJob {
        title: "DevOps Engineer",
        slug: "devops-engineer",
        status: JobStatus::Active,
        tags: &["AWS", "Docker", "Kubernetes", "CI/CD"],
        location: "Delhi, India",
        salary: "₹14,00,000 - ₹20,00,000",
        description: "Help us scale our infrastructure and improve our deployment processes.",
        requirements: &["AWS experience", "Container orchestration", "CI/CD pipelines", "Monitoring tools"],
    },
    SeedJob {
        title: "Product Manager",
        slug: "product-manager",
        status: JobStatus::Active,
        tags: &["Product", "Strategy", "Leadership", "Analytics"],
        location: "Pune, India",
        salary: "₹18,00,000 - ₹28,00,000",
        description: "Lead product strategy and work with cross-functional teams to deliver great products.",
        requirements: &["3+ years PM experience", "Technical background", "Analytics skills", "Leadership experience"],
    },
    SeedJob {
        title: "UX Designer",
        slug: "ux-designer",
        status: JobStatus::Active,
        tags: &["Design", "User Research", "Prototyping", "Figma"],
        location: "Chennai, India",
        salary: "₹10,00,000 - ₹15,00,000",
        description: "Create intuitive and beautiful user experiences for our products.",
        requirements: &["Portfolio required", "Figma proficiency", "User research", "Prototyping skills"],
    },
    SeedJob {
        title: "Data Scientist",
        slug: "data-scientist",
        status: JobStatus::Active,
        tags: &["Machine Learning", "Python", "Statistics", "Analytics"],
        location: "Hyderabad, India",
        salary: "₹16,00,000 - ₹24,00,000",
        description: "Apply machine learning and statistical analysis to solve complex business problems.",
        requirements: &["PhD or MS in relevant field", "Python/R proficiency", "ML algorithms", "Statistics background"],
    },
    SeedJob {
        title: "Mobile Developer (React Native)",
        slug: "mobile-developer-react-native",
        status: JobStatus::Active,
        tags: &["React Native", "Mobile", "iOS", "Android"],
        location: "Kolkata, India",
        salary: "₹11,00,000 - ₹16,00,000",
        description: "Build cross-platform mobile applications using React Native.",
        requirements: &["React Native experience", "iOS/Android knowledge", "JavaScript/TypeScript", "Mobile UI/UX"],
    },
    SeedJob {
        title: "QA Engineer",
        slug: "qa-engineer",
        status: JobStatus::Active,
        tags: &["Testing", "Automation", "Selenium", "Quality"],
        location: "Ahmedabad, India",
        salary: "₹8,00,000 - ₹12,00,000",
        description: "Ensure the quality of our products through comprehensive testing strategies.",
        requirements: &["Testing experience", "Automation tools", "Test planning", "Bug tracking"],
    },
    SeedJob {
        title: "Security Engineer",
        slug: "security-engineer",
        status: JobStatus::Active,
        tags: &["Security", "Cybersecurity", "Penetration Testing", "Compliance"],
        location: "Jaipur, India",
        salary: "₹13,00,000 - ₹19,00,000",
        description: "Protect our systems and data from security threats and vulnerabilities.",
        requirements: &["Security certifications", "Penetration testing", "Security tools", "Compliance knowledge"],
    },
    SeedJob {
        title: "Technical Writer",
        slug: "technical-writer",
        status: JobStatus::Active,
        tags: &["Documentation", "Technical Writing", "API Docs", "Communication"],
        location: "Remote",
        salary: "₹6,00,000 - ₹10,00,000",
        description: "Create clear and comprehensive technical documentation for our products and APIs.",
        requirements: &["Technical writing experience", "API documentation", "Markdown/Git", "Communication skills"],
    },
    SeedJob {
        title: "Junior Developer",
        slug: "junior-developer",
        status: JobStatus::Archived,
        tags: &["JavaScript", "React", "Junior", "Entry Level"],
        location: "Indore, India",
        salary: "₹5,00,000 - ₹8,00,000",
        description: "Entry-level position for recent graduates or career changers.",
        requirements: &["Basic programming knowledge", "Willingness to learn", "Problem-solving skills"],
    },
    SeedJob {
        title: "Marketing Manager",
        slug: "marketing-manager",
        status: JobStatus::Archived,
        tags: &["Marketing", "Digital Marketing", "Campaigns", "Analytics"],
        location: "Gurgaon, India",
        salary: "₹9,00,000 - ₹13,00,000",
        description: "Lead our marketing efforts and drive user acquisition.",
        requirements: &["Marketing experience", "Digital marketing", "Analytics tools", "Campaign management"],
    },
    SeedJob {
        title: "Sales Representative",
        slug: "sales-representative",
        status: JobStatus::Archived,
        tags: &["Sales", "B2B", "CRM", "Communication"],
        location: "Noida, India",
        salary: "₹6,00,000 - ₹10,00,000",
        description: "Drive sales growth by building relationships with potential customers.",
        requirements: &["Sales experience", "B2B sales", "CRM systems", "Communication skills"],
    },
    SeedJob {
        title: "Full Stack Developer",
        slug: "full-stack-developer",
        status: JobStatus::Active,
        tags: &["React", "Node.js", "MongoDB", "Full Stack"],
        location: "Kochi, India",
        salary: "₹12,00,000 - ₹18,00,000",
        description: "Build end-to-end applications using modern web technologies.",
        requirements: &["React/Node.js experience", "Database knowledge", "API development", "Frontend/Backend skills"],
    },
    SeedJob {
        title: "Machine Learning Engineer",
        slug: "machine-learning-engineer",
        status: JobStatus::Active,
        tags: &["Python", "TensorFlow", "ML", "AI"],
        location: "Bangalore, India",
        salary: "₹18,00,000 - ₹30,00,000",
        description: "Develop and deploy machine learning models for production use.",
        requirements: &["Python expertise", "ML frameworks", "Model deployment", "Statistics knowledge"],
    },
    SeedJob {
        title: "Cloud Solutions Architect",
        slug: "cloud-solutions-architect",
        status: JobStatus::Active,
        tags: &["AWS", "Azure", "Architecture", "Cloud"],
        location: "Pune, India",
        salary: "₹20,00,000 - ₹35,00,000",
        description: "Design and implement cloud-based solutions for enterprise clients.",
        requirements: &["Cloud platform expertise", "Architecture design", "Migration experience", "Security knowledge"],
    },
    SeedJob {
        title: "UI/UX Designer",
        slug: "ui-ux-designer",
        status: JobStatus::Active,
        tags: &["Figma", "Sketch", "Design", "Prototyping"],
        location: "Mumbai, India",
        salary: "₹8,00,000 - ₹15,00,000",
        description: "Create intuitive and beautiful user interfaces and experiences.",
        requirements: &["Design tools proficiency", "User research", "Prototyping", "Design systems"],
    },
    SeedJob {
        title: "Database Administrator",
        slug: "database-administrator",
        status: JobStatus::Active,
        tags: &["SQL", "PostgreSQL", "MySQL", "Database"],
        location: "Chennai, India",
        salary: "₹10,00,000 - ₹16,00,000",
        description: "Manage and optimize database systems for high performance.",
        requirements: &["Database management", "Performance tuning", "Backup/recovery", "Security practices"],
    },
    SeedJob {
        title: "Business Analyst",
        slug: "business-analyst",
        status: JobStatus::Active,
        tags: &["Analytics", "Requirements", "Documentation", "Stakeholder"],
        location: "Delhi, India",
        salary: "₹9,00,000 - ₹14,00,000",
        description: "Analyze business processes and requirements for technical solutions.",
        requirements: &["Business analysis", "Requirements gathering", "Documentation", "Stakeholder management"],
    },
    SeedJob {
        title: "Content Writer",
        slug: "content-writer",
        status: JobStatus::Active,
        tags: &["Writing", "SEO", "Marketing", "Content"],
        location: "Remote",
        salary: "₹4,00,000 - ₹8,00,000",
        description: "Create engaging content for marketing and product documentation.",
        requirements: &["Writing skills", "SEO knowledge", "Marketing content", "Technical writing"],
    },
    SeedJob {
        title: "Network Engineer",
        slug: "network-engineer",
        status: JobStatus::Active,
        tags: &["Networking", "Cisco", "Security", "Infrastructure"],
        location: "Hyderabad, India",
        salary: "₹11,00,000 - ₹17,00,000",
        description: "Design and maintain network infrastructure and security.",
        requirements: &["Network protocols", "Cisco equipment", "Network security", "Troubleshooting"],
    },
    SeedJob {
        title: "Project Manager",
        slug: "project-manager",
        status: JobStatus::Active,
        tags: &["Agile", "Scrum", "Leadership", "Project Management"],
        location: "Gurgaon, India",
        salary: "₹12,00,000 - ₹20,00,000",
        description: "Lead cross-functional teams to deliver projects on time and budget.",
        requirements: &["Project management", "Agile/Scrum", "Team leadership", "Risk management"],
    },
    SeedJob {
        title: "Customer Success Manager",
        slug: "customer-success-manager",
        status: JobStatus::Active,
        tags: &["Customer Success", "Retention", "Support", "Account Management"],
        location: "Bangalore, India",
        salary: "₹8,00,000 - ₹13,00,000",
        description: "Ensure customer satisfaction and drive product adoption.",
        requirements: &["Customer success", "Account management", "Data analysis", "Communication skills"],
    },
    SeedJob {
        title: "DevOps Engineer",
        slug: "devops-engineer-2",
        status: JobStatus::Archived,
        tags: &["Docker", "Jenkins", "CI/CD", "Infrastructure"],
        location: "Pune, India",
        salary: "₹14,00,000 - ₹22,00,000",
        description: "Streamline development and deployment processes.",
        requirements: &["CI/CD pipelines", "Containerization", "Infrastructure as code", "Monitoring tools"],
    },
    SeedJob {
        title: "HR Manager",
        slug: "hr-manager",
        status: JobStatus::Archived,
        tags: &["HR", "Recruitment", "Employee Relations", "HRIS"],
        location: "Mumbai, India",
        salary: "₹10,00,000 - ₹16,00,000",
        description: "Manage human resources operations and employee relations.",
        requirements: &["HR experience", "Recruitment", "Employee relations", "HR systems"],
    },
];

const FIRST_NAMES: &[&str] = &[
    "Arjun", "Rajesh", "Vikram", "Amit", "Rahul", "Suresh", "Kumar", "Prakash", "Ankit",
    "Deepak", "Nikhil", "Rohit", "Sachin", "Manish", "Gaurav", "Ravi", "Vinod", "Ajay",
    "Sandeep", "Pankaj", "Priya", "Anita", "Sunita", "Rekha", "Sushma", "Kavita", "Meera",
    "Seema", "Ritu", "Neha", "Pooja", "Shilpa", "Manisha", "Deepa", "Shweta", "Nisha",
    "Anjali", "Rashmi", "Vidya", "Usha",
];

const LAST_NAMES: &[&str] = &[
    "Sharma", "Verma", "Gupta", "Kumar", "Singh", "Patel", "Yadav", "Khan", "Shah",
    "Agarwal", "Jain", "Malik", "Chauhan", "Reddy", "Mishra", "Pandey", "Rao", "Joshi",
    "Nair", "Iyer", "Bansal", "Khanna", "Bhatia", "Chopra", "Mehta", "Saxena", "Tiwari",
    "Banerjee", "Mukherjee", "Das", "Ghosh", "Roy", "Kulkarni", "Menon",
];

const STAGES: [Stage; 6] = [
    Stage::Applied,
    Stage::Screen,
    Stage::Tech,
    Stage::Offer,
    Stage::Hired,
    Stage::Rejected,
];

#[derive(Clone)]
pub struct SeedService {
    pool: SqlitePool,
}

impl SeedService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Idempotent bootstrap: populates an empty store with sample data and
    /// is a no-op otherwise. Writes go straight to the store, not through
    /// the simulated network envelope.
    pub async fn seed_if_empty(&self, profile: &SeedProfile) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            debug!("store already populated, skipping seed");
            return Ok(false);
        }

        let mut rng = match profile.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let job_ids = self.seed_jobs().await?;
        self.seed_candidates(&job_ids, profile.candidates, &mut rng)
            .await?;
        let assessments = self.seed_assessments(&job_ids).await?;

        info!(
            jobs = job_ids.len(),
            candidates = profile.candidates,
            assessments,
            "seeded sample data"
        );
        Ok(true)
    }

    async fn seed_jobs(&self) -> Result<Vec<String>> {
        let now = time::now();
        let mut ids = Vec::with_capacity(SEED_JOBS.len());

        for (i, seed) in SEED_JOBS.iter().enumerate() {
            let job_id = id::synthesize("job");
            let created = now - Duration::days((SEED_JOBS.len() - i) as i64);
            let tags: Vec<String> = seed.tags.iter().map(|t| t.to_string()).collect();
            let requirements: Vec<String> =
                seed.requirements.iter().map(|r| r.to_string()).collect();

            sqlx::query(
                r#"INSERT INTO jobs (id, title, slug, status, tags, "order", description, requirements, location, salary, created_at, updated_at)
                   VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
            )
            .bind(&job_id)
            .bind(seed.title)
            .bind(seed.slug)
            .bind(seed.status)
            .bind(Json(tags))
            .bind((i + 1) as i64)
            .bind(seed.description)
            .bind(Json(requirements))
            .bind(seed.location)
            .bind(seed.salary)
            .bind(created)
            .bind(created)
            .execute(&self.pool)
            .await?;

            ids.push(job_id);
        }

        Ok(ids)
    }

    async fn seed_candidates(
        &self,
        job_ids: &[String],
        count: usize,
        rng: &mut StdRng,
    ) -> Result<()> {
        let now = time::now();

        for i in 0..count {
            let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
            let name = format!("{} {}", first, last);
            let email = format!(
                "{}.{}{}@gmail.com",
                first.to_lowercase(),
                last.to_lowercase(),
                i
            );
            let phone = format!(
                "+91-{}-{}-{}",
                rng.gen_range(100..1000),
                rng.gen_range(100..1000),
                rng.gen_range(1000..10000)
            );
            let job_id = &job_ids[rng.gen_range(0..job_ids.len())];
            let stage = STAGES[rng.gen_range(0..STAGES.len())];
            let linkedin = format!(
                "https://linkedin.com/in/{}-{}-{}",
                first.to_lowercase(),
                last.to_lowercase(),
                i
            );
            let portfolio = if rng.gen_bool(0.3) {
                Some(format!(
                    "https://{}-{}.com",
                    first.to_lowercase(),
                    last.to_lowercase()
                ))
            } else {
                None
            };
            let notes = if rng.gen_bool(0.2) {
                Some(format!(
                    "Strong candidate with {} years of experience in Indian tech industry.",
                    rng.gen_range(1..6)
                ))
            } else {
                None
            };
            let created = now
                - Duration::days(rng.gen_range(0..60))
                - Duration::minutes(rng.gen_range(0..1440));

            let candidate_id = id::synthesize("candidate");
            sqlx::query(
                "INSERT INTO candidates (id, name, email, phone, stage, job_id, resume, linkedin, portfolio, notes, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&candidate_id)
            .bind(&name)
            .bind(&email)
            .bind(&phone)
            .bind(stage)
            .bind(job_id)
            .bind(Option::<String>::None)
            .bind(&linkedin)
            .bind(&portfolio)
            .bind(&notes)
            .bind(created)
            .bind(created)
            .execute(&self.pool)
            .await?;

            for (step, past_stage) in stage_path(stage).into_iter().enumerate() {
                let timestamp = created + Duration::hours(step as i64 * 24);
                sqlx::query(
                    "INSERT INTO candidate_timeline (id, candidate_id, stage, timestamp, notes, user_id)
                     VALUES (?, ?, ?, ?, ?, ?)",
                )
                .bind(id::synthesize("timeline"))
                .bind(&candidate_id)
                .bind(past_stage)
                .bind(timestamp)
                .bind(format!("Stage changed to {}", past_stage))
                .bind(Option::<String>::None)
                .execute(&self.pool)
                .await?;
            }
        }

        Ok(())
    }

    async fn seed_assessments(&self, job_ids: &[String]) -> Result<usize> {
        let now = time::now();
        let seeded = job_ids.iter().take(3);
        let mut count = 0;

        for (i, job_id) in seeded.enumerate() {
            let sections = sample_sections();
            sqlx::query(
                "INSERT INTO assessments (id, job_id, title, description, sections, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(id::synthesize("assessment"))
            .bind(job_id)
            .bind(format!("Screening Assessment #{}", i + 1))
            .bind("Standard screening questionnaire for this role.")
            .bind(Json(sections))
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await?;
            count += 1;
        }

        Ok(count)
    }
}

fn stage_path(stage: Stage) -> Vec<Stage> {
    match stage {
        Stage::Rejected => vec![Stage::Applied, Stage::Rejected],
        current => {
            let mut path = Vec::new();
            for s in Stage::PIPELINE {
                path.push(s);
                if s == current {
                    break;
                }
            }
            path
        }
    }
}

fn sample_sections() -> Vec<AssessmentSection> {
    vec![
        AssessmentSection {
            id: id::synthesize("section"),
            title: "Technical Skills Assessment".to_string(),
            description: Some(
                "Comprehensive evaluation of technical knowledge and skills".to_string(),
            ),
            order: 1,
            questions: vec![
                AssessmentQuestion {
                    id: "tech-1".to_string(),
                    kind: QuestionType::SingleChoice,
                    title: "How many years of experience do you have with the primary technology for this role?".to_string(),
                    description: None,
                    required: true,
                    options: Some(vec![
                        "Less than 1 year".to_string(),
                        "1-2 years".to_string(),
                        "3-5 years".to_string(),
                        "5+ years".to_string(),
                        "10+ years".to_string(),
                    ]),
                    min: None,
                    max: None,
                    max_length: None,
                    conditional: None,
                    order: 1,
                },
                AssessmentQuestion {
                    id: "tech-2".to_string(),
                    kind: QuestionType::MultiChoice,
                    title: "Which of the following technologies are you familiar with?".to_string(),
                    description: None,
                    required: true,
                    options: Some(vec![
                        "JavaScript".to_string(),
                        "TypeScript".to_string(),
                        "React".to_string(),
                        "Node.js".to_string(),
                        "Python".to_string(),
                        "AWS".to_string(),
                        "Docker".to_string(),
                        "Git".to_string(),
                    ]),
                    min: None,
                    max: None,
                    max_length: None,
                    conditional: None,
                    order: 2,
                },
                AssessmentQuestion {
                    id: "tech-3".to_string(),
                    kind: QuestionType::ShortText,
                    title: "Which technology from the previous list do you know best?".to_string(),
                    description: None,
                    required: true,
                    options: None,
                    min: None,
                    max: None,
                    max_length: Some(120),
                    conditional: Some(ConditionalRule {
                        question_id: "tech-2".to_string(),
                        operator: ConditionOperator::Contains,
                        value: serde_json::json!("React"),
                    }),
                    order: 3,
                },
                AssessmentQuestion {
                    id: "tech-4".to_string(),
                    kind: QuestionType::Numeric,
                    title: "How many production systems have you shipped?".to_string(),
                    description: None,
                    required: false,
                    options: None,
                    min: Some(0.0),
                    max: Some(100.0),
                    max_length: None,
                    conditional: None,
                    order: 4,
                },
            ],
        },
        AssessmentSection {
            id: id::synthesize("section"),
            title: "Background".to_string(),
            description: None,
            order: 2,
            questions: vec![
                AssessmentQuestion {
                    id: "bg-1".to_string(),
                    kind: QuestionType::LongText,
                    title: "Describe a challenging project you worked on recently.".to_string(),
                    description: Some("A few sentences are enough.".to_string()),
                    required: true,
                    options: None,
                    min: None,
                    max: None,
                    max_length: Some(2000),
                    conditional: None,
                    order: 1,
                },
                AssessmentQuestion {
                    id: "bg-2".to_string(),
                    kind: QuestionType::FileUpload,
                    title: "Upload your current resume.".to_string(),
                    description: None,
                    required: false,
                    options: None,
                    min: None,
                    max: None,
                    max_length: None,
                    conditional: None,
                    order: 2,
                },
            ],
        },
    ]
}
