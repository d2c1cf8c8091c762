//! Initial content, used for any collection that has nothing persisted.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};

use labnet_core::{
    ArticleDetails, Education, Experience, JobDetails, Post, PostKind, Project, ProjectStatus,
    Publication, Snapshot, User,
};

fn ids(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(ToString::to_string).collect()
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

/// The signed-in researcher, id `"1"`.
#[must_use]
pub fn current_user() -> User {
    User {
        id: "1".to_string(),
        name: "Dr Jan Kowalski".to_string(),
        avatar: "https://images.unsplash.com/photo-1560250097-0b93528c311a?w=100&h=100&fit=crop"
            .to_string(),
        cover_image:
            "https://images.unsplash.com/photo-1628017975048-74768e00219e?w=1440&h=300&fit=crop"
                .to_string(),
        title: "PhD in Artificial Intelligence".to_string(),
        bio: "Machine learning researcher working on deep learning for medical diagnostics."
            .to_string(),
        institution: "TechCorp Research Lab".to_string(),
        location: "Warsaw, Poland".to_string(),
        connections: ids(&["2", "3"]),
        profile_views: 892,
        citations: 145,
        skills: strings(&[
            "Machine Learning",
            "Deep Learning",
            "Python",
            "TensorFlow",
            "Research",
            "Data Science",
        ]),
        research_interests: strings(&[
            "Artificial Intelligence",
            "Medical Imaging",
            "Neural Networks",
            "Computer Vision",
        ]),
        experience: vec![
            Experience {
                id: "exp-1".to_string(),
                position: "Senior Research Scientist".to_string(),
                institution: "TechCorp Research Lab".to_string(),
                start_date: "2020-01".to_string(),
                end_date: None,
                current: true,
                description: "Leads a five-person team applying AI to medical diagnostics."
                    .to_string(),
            },
            Experience {
                id: "exp-2".to_string(),
                position: "Research Fellow".to_string(),
                institution: "MIT Media Lab".to_string(),
                start_date: "2018-06".to_string(),
                end_date: Some("2019-12".to_string()),
                current: false,
                description: "Deep learning and computer vision projects.".to_string(),
            },
        ],
        education: vec![
            Education {
                id: "edu-1".to_string(),
                institution: "University of Warsaw".to_string(),
                degree: "PhD".to_string(),
                field: "Computer Science".to_string(),
                start_year: "2015".to_string(),
                end_year: Some("2019".to_string()),
                current: false,
            },
            Education {
                id: "edu-2".to_string(),
                institution: "Warsaw University of Technology".to_string(),
                degree: "MSc".to_string(),
                field: "Computer Science".to_string(),
                start_year: "2011".to_string(),
                end_year: Some("2015".to_string()),
                current: false,
            },
        ],
        publications: vec![
            Publication {
                id: "pub-1".to_string(),
                title: "Deep Learning Approaches in Medical Image Analysis".to_string(),
                authors: strings(&["Jan Kowalski", "Anna Nowak", "Piotr Wiśniewski"]),
                journal: "Nature Machine Intelligence".to_string(),
                year: "2023".to_string(),
                doi: Some("10.1038/s42256-023-00000-0".to_string()),
                citations: 78,
            },
            Publication {
                id: "pub-2".to_string(),
                title: "Neural Networks for Cancer Detection".to_string(),
                authors: strings(&["Jan Kowalski", "Maria Kowalczyk"]),
                journal: "Journal of Medical AI".to_string(),
                year: "2022".to_string(),
                doi: Some("10.1016/j.jmai.2022.00000".to_string()),
                citations: 67,
            },
        ],
        projects: vec![Project {
            id: "proj-1".to_string(),
            name: "AI-Powered Medical Diagnosis".to_string(),
            description: "Deep learning system for early tumour detection.".to_string(),
            status: ProjectStatus::Active,
            team: strings(&["1", "2", "4"]),
        }],
        gallery: strings(&[
            "https://images.unsplash.com/photo-1707944745899-104a4b12d945?w=400&h=400&fit=crop",
            "https://images.unsplash.com/photo-1631599143424-5bc234fbebf1?w=400&h=400&fit=crop",
            "https://images.unsplash.com/photo-1765830403209-a5eceac4c198?w=400&h=400&fit=crop",
        ]),
    }
}

struct SeedUser {
    id: &'static str,
    name: &'static str,
    title: &'static str,
    bio: &'static str,
    institution: &'static str,
    location: &'static str,
    connections: &'static [&'static str],
    profile_views: u64,
    citations: u64,
    skills: &'static [&'static str],
    interests: &'static [&'static str],
}

const OTHERS: [SeedUser; 4] = [
    SeedUser {
        id: "2",
        name: "Dr Anna Nowak",
        title: "Professor of Computer Science",
        bio: "AI and deep learning researcher. Heads the AI lab at MIT.",
        institution: "MIT",
        location: "Boston, USA",
        connections: &["1", "3"],
        profile_views: 2340,
        citations: 567,
        skills: &["AI", "Deep Learning", "Research", "Python", "TensorFlow"],
        interests: &["Quantum Computing", "AI", "Machine Learning"],
    },
    SeedUser {
        id: "3",
        name: "Prof. Piotr Wiśniewski",
        title: "Research Director in Quantum Computing",
        bio: "Quantum computing pioneer with 50+ peer-reviewed publications.",
        institution: "Stanford University",
        location: "Stanford, USA",
        connections: &["1", "2"],
        profile_views: 3456,
        citations: 892,
        skills: &["Quantum Computing", "Physics", "Mathematics"],
        interests: &["Quantum Computing", "Quantum Algorithms", "Quantum ML"],
    },
    SeedUser {
        id: "4",
        name: "Dr Maria Kowalczyk",
        title: "Biomedical Engineer",
        bio: "Bionics, smart prosthetics and brain-computer interfaces.",
        institution: "Harvard Medical School",
        location: "Boston, USA",
        connections: &[],
        profile_views: 1234,
        citations: 234,
        skills: &["Bioengineering", "BCI", "Neuroscience"],
        interests: &["Brain-Computer Interfaces", "Prosthetics", "Rehabilitation"],
    },
    SeedUser {
        id: "5",
        name: "Prof. Tomasz Nowicki",
        title: "Astrophysics Professor",
        bio: "Dark matter and exoplanet research. Lecturer at the University of Cambridge.",
        institution: "University of Cambridge",
        location: "Cambridge, UK",
        connections: &[],
        profile_views: 2890,
        citations: 1234,
        skills: &["Astrophysics", "Data Analysis", "Research"],
        interests: &["Dark Matter", "Exoplanets", "Cosmology"],
    },
];

const AVATARS: [&str; 2] = [
    "https://images.unsplash.com/photo-1649589244330-09ca58e4fa64?w=100&h=100&fit=crop",
    "https://images.unsplash.com/photo-1560250097-0b93528c311a?w=100&h=100&fit=crop",
];

const COVERS: [&str; 2] = [
    "https://images.unsplash.com/photo-1633457896836-f8d6025c85d1?w=1440&h=300&fit=crop",
    "https://images.unsplash.com/photo-1628017975048-74768e00219e?w=1440&h=300&fit=crop",
];

/// Every other researcher, ids `"2"` to `"5"`.
#[must_use]
pub fn other_users() -> Vec<User> {
    OTHERS
        .iter()
        .enumerate()
        .map(|(i, s)| User {
            id: s.id.to_string(),
            name: s.name.to_string(),
            avatar: AVATARS[i % 2].to_string(),
            cover_image: COVERS[i % 2].to_string(),
            title: s.title.to_string(),
            bio: s.bio.to_string(),
            institution: s.institution.to_string(),
            location: s.location.to_string(),
            connections: ids(s.connections),
            profile_views: s.profile_views,
            citations: s.citations,
            skills: strings(s.skills),
            research_interests: strings(s.interests),
            ..User::default()
        })
        .collect()
}

fn author(users: &[User], id: &str) -> Snapshot<User> {
    users
        .iter()
        .find(|u| u.id == id)
        .map(Snapshot::capture)
        .unwrap_or_else(|| {
            Snapshot::from(User {
                id: id.to_string(),
                ..User::default()
            })
        })
}

/// The initial feed, newest first, timestamped relative to `now`.
#[must_use]
pub fn posts(now: DateTime<Utc>) -> Vec<Post> {
    let users = other_users();
    let base = |id: &str, author_id: &str, content: &str, age: Duration, kind: PostKind| Post {
        id: id.to_string(),
        author: author(&users, author_id),
        content: content.to_string(),
        images: Vec::new(),
        youtube_url: None,
        pdf_url: None,
        likes: BTreeSet::new(),
        comments: Vec::new(),
        shares: 0,
        timestamp: now - age,
        kind,
        job_details: None,
        article_details: None,
    };

    vec![
        Post {
            images: strings(&["https://images.unsplash.com/photo-1707944745899-104a4b12d945?w=800"]),
            likes: ids(&["1", "3"]),
            shares: 12,
            article_details: Some(ArticleDetails {
                abstract_text: "A deep-learning method for optimizing quantum algorithms, \
                                improving computational efficiency by 34%."
                    .to_string(),
                keywords: strings(&["Quantum Computing", "Deep Learning"]),
                journal: Some("Nature".to_string()),
                ..ArticleDetails::default()
            }),
            ..base(
                "post-1",
                "2",
                "Just published in Nature: \"Deep Learning Approaches to Quantum Computing \
                 Optimization\". Two years of work show a 34% efficiency gain on practical \
                 quantum workloads.\n\n#QuantumComputing #DeepLearning #Research",
                Duration::hours(3),
                PostKind::Article,
            )
        },
        Post {
            likes: ids(&["1", "2"]),
            shares: 24,
            job_details: Some(JobDetails {
                position: "Postdoctoral Researcher - Quantum ML".to_string(),
                company: "Stanford Quantum Computing Lab".to_string(),
                location: "Stanford, CA (hybrid)".to_string(),
                salary: Some("$75,000 - $90,000".to_string()),
                job_type: "full-time".to_string(),
                field: "Quantum Computing".to_string(),
                level: "postdoc".to_string(),
                description: "Quantum machine learning for drug discovery, NIH-funded.".to_string(),
                requirements: "PhD in CS, physics or related field; Python, Qiskit or Cirq."
                    .to_string(),
                benefits: "Flexible hours, remote options, conference budget.".to_string(),
                ..JobDetails::default()
            }),
            ..base(
                "post-2",
                "3",
                "We are hiring postdocs for \"Quantum Machine Learning Applications in Drug \
                 Discovery\". Three-year NIH grant, applications open until January 31.",
                Duration::hours(5),
                PostKind::Job,
            )
        },
        Post {
            images: strings(&["https://images.unsplash.com/photo-1765830403209-a5eceac4c198?w=800"]),
            youtube_url: Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()),
            shares: 8,
            article_details: Some(ArticleDetails {
                abstract_text: "Real-time EEG decoding with neural transformers lets patients \
                                control bionic prostheses with 98% accuracy."
                    .to_string(),
                keywords: strings(&["BCI", "Prosthetics", "Neuroscience"]),
                ..ArticleDetails::default()
            }),
            ..base(
                "post-3",
                "4",
                "Patients controlled our new brain-computer-interface prostheses with 98% \
                 accuracy after only two weeks of training.\n\n#Bioengineering #BCI",
                Duration::days(1),
                PostKind::Article,
            )
        },
        Post {
            likes: ids(&["3"]),
            shares: 5,
            ..base(
                "post-4",
                "2",
                "Survey of 2,500 scientists in 50 countries: 89% call AI a key tool, 67% use \
                 ML for data analysis, 45% worry about its ethics. Thoughts?",
                Duration::days(2),
                PostKind::Post,
            )
        },
    ]
}
