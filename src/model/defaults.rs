//! Built-in documents used when a data document cannot be loaded.
//!
//! Placeholder content only; a real site replaces both documents.

use super::{CertificationEntry, EducationEntry, ExperienceEntry, Project, SiteConfig, SocialLink};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

/// Default site profile.
pub fn site_config() -> SiteConfig {
    SiteConfig {
        name: "Your Name".into(),
        role: "Data Scientist & GenAI Engineer".into(),
        location: "Your City, Country".into(),
        email: "your@email.com".into(),
        phone: String::new(),
        github: "https://github.com/your-github".into(),
        linkedin: "https://www.linkedin.com/in/your-linkedin/".into(),
        twitter: String::new(),
        resume_url: "#".into(),
        hero_tagline: "Data Scientist & GenAI Engineer".into(),
        hero_subtitle: "I build end-to-end machine learning and generative AI systems that create measurable business impact.".into(),
        about_text: "I specialize in applied machine learning, LLM systems, and data engineering. I combine strong fundamentals with pragmatic execution to deliver production-ready solutions across NLP, vision, and time series.".into(),
        contact_text: "Open to collaborations, research, and roles in data science and generative AI. Let\u{2019}s build something meaningful.".into(),
        highlights: strings(&[
            "Production LLM apps: RAG, tools, evals",
            "MLOps: tracking, CI, serving, monitoring",
            "NLP, CV, time series forecasting",
            "Cloud: AWS/GCP; Vector DBs; GPUs",
        ]),
        education: vec![EducationEntry {
            school: "Example University".into(),
            degree: "M.S. Data Science".into(),
            duration: "2023 \u{2013} 2025".into(),
            location: "City, Country".into(),
            focus: "Graduate coursework in machine learning, AI, and big data engineering.".into(),
            highlights: strings(&[
                "Capstone: NLP system for financial insights.",
                "Teaching assistant for Statistical Learning.",
            ]),
        }],
        experience: vec![ExperienceEntry {
            company: "Example Corp".into(),
            role: "Senior Data Scientist".into(),
            duration: "2022 \u{2013} Present".into(),
            location: "Remote".into(),
            summary: "Leading applied ML projects across NLP and time-series forecasting.".into(),
            highlights: strings(&[
                "Reduced churn by 12% via uplift modeling.",
                "Scaled model serving with Kubernetes and MLflow.",
            ]),
        }],
        certifications: vec![CertificationEntry {
            title: "Advanced ML Certification".into(),
            org: "Institute of Data".into(),
            issued: "2024".into(),
            link: "https://example.com/cert".into(),
            ..Default::default()
        }],
        skills: strings(&[
            "Python", "PyTorch", "TensorFlow", "scikit-learn", "XGBoost",
            "LangChain", "OpenAI API", "LlamaIndex", "HuggingFace",
            "RAG", "Vector DBs", "LLM Orchestration", "Prompting",
            "Airflow", "Docker", "Kubernetes", "AWS", "GCP",
            "PostgreSQL", "BigQuery", "dbt", "Apache Spark",
        ]),
        socials: vec![
            SocialLink {
                label: "GitHub".into(),
                href: "https://github.com/your-github".into(),
            },
            SocialLink {
                label: "LinkedIn".into(),
                href: "https://www.linkedin.com/in/your-linkedin/".into(),
            },
        ],
    }
}

/// Default project list: three sample projects.
pub fn projects() -> Vec<Project> {
    vec![
        Project {
            title: "RAG System for Enterprise Docs".into(),
            description: "Retrieval\u{2011}Augmented Generation pipeline with chunking, hybrid search, and domain\u{2011}tuned reranking; robust evaluation and guardrails.".into(),
            tags: strings(&["LLM", "RAG", "VectorDB", "OpenAI"]),
            tech: strings(&["Python", "LangChain", "FAISS"]),
            image: "assets/no-image.svg".into(),
            github: "https://github.com/your-github/rag-enterprise".into(),
            demo: String::new(),
            stars: Some(5.0),
            date: Some("2024-06-01".into()),
            featured: true,
        },
        Project {
            title: "Demand Forecasting Platform".into(),
            description: "Hierarchical time series forecasts with feature store, model ensembling, and ML monitoring. 18% MAPE improvement.".into(),
            tags: strings(&["Forecasting", "Time Series"]),
            tech: strings(&["Python", "Prophet", "LightGBM", "Airflow"]),
            image: "assets/no-image.svg".into(),
            github: "https://github.com/your-github/demand-forecasting".into(),
            demo: String::new(),
            stars: Some(4.0),
            date: Some("2023-12-15".into()),
            featured: false,
        },
        Project {
            title: "Defect Detection (Vision)".into(),
            description: "Transfer learning + active learning loop for industrial defects; achieved 97% F1 on imbalanced dataset.".into(),
            tags: strings(&["Computer Vision", "ML"]),
            tech: strings(&["PyTorch", "FastAPI", "Docker"]),
            image: "assets/no-image.svg".into(),
            github: "https://github.com/your-github/defect-detection".into(),
            demo: String::new(),
            stars: Some(3.0),
            date: Some("2023-06-01".into()),
            featured: false,
        },
    ]
}
