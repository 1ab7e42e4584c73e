//! Sample data mirroring what the development backends seed

use eventhub_api::types::{Event, EventId, NewUser, Speaker, User, UserId};

/// Minimal event with an id, title and date
#[must_use]
pub fn event(id: i64, title: &str, date: &str) -> Event {
    Event::new(EventId(id), title, date)
}

/// Event with a description, for search tests
#[must_use]
pub fn described_event(id: i64, title: &str, date: &str, description: &str) -> Event {
    Event {
        description: description.to_string(),
        ..event(id, title, date)
    }
}

/// The two events the Campus Events backend starts with
#[must_use]
pub fn campus_events() -> Vec<Event> {
    vec![
        Event {
            description: "Annual coding competition for students to showcase their programming skills."
                .to_string(),
            form_link: Some("https://forms.gle/hackathon".to_string()),
            speaker: Some(Speaker {
                name: "Dr. Sarah Johnson".to_string(),
                title: "CTO at Tech Innovations Inc.".to_string(),
                bio: "Expert in AI and Machine Learning with 15+ years of industry experience."
                    .to_string(),
            }),
            ..event(1, "Hackathon", "2025-09-01")
        },
        Event {
            description:
                "Celebration of cultural diversity through music, dance, and art performances."
                    .to_string(),
            form_link: Some("https://forms.gle/example2".to_string()),
            speaker: Some(Speaker {
                name: "Prof. Michael Chen".to_string(),
                title: "Dean of Arts & Culture".to_string(),
                bio: "Renowned cultural historian and event organizer.".to_string(),
            }),
            ..event(2, "Cultural Fest", "2025-09-15")
        },
    ]
}

/// The three events the EventHub backend seeds
#[must_use]
pub fn eventhub_events() -> Vec<Event> {
    let seeded = |id: i64,
                  title: &str,
                  description: &str,
                  date: &str,
                  time: &str,
                  location: &str,
                  category: &str,
                  capacity: u32,
                  price: f64,
                  organizer: &str,
                  tags: &[&str]| Event {
        description: description.to_string(),
        time: Some(time.to_string()),
        location: Some(location.to_string()),
        category: Some(category.to_string()),
        capacity: Some(capacity),
        price: Some(price),
        status: Some("active".to_string()),
        organizer: Some(organizer.to_string()),
        tags: tags.iter().map(|tag| (*tag).to_string()).collect(),
        ..event(id, title, date)
    };

    vec![
        seeded(
            1,
            "Tech Hackathon 2025",
            "Join us for an exciting 48-hour coding challenge!",
            "2025-09-01",
            "09:00",
            "Main Campus Auditorium",
            "Technology",
            100,
            25.0,
            "Computer Science Department",
            &["coding", "innovation", "networking"],
        ),
        seeded(
            2,
            "Cultural Fest 2025",
            "Celebrate diversity through music, dance, and art!",
            "2025-09-15",
            "18:00",
            "University Amphitheater",
            "Cultural",
            200,
            15.0,
            "Student Affairs",
            &["culture", "arts", "celebration"],
        ),
        seeded(
            3,
            "Career Fair 2025",
            "Connect with top employers and explore career opportunities!",
            "2025-10-01",
            "10:00",
            "Business School",
            "Career",
            300,
            0.0,
            "Career Services",
            &["career", "networking", "jobs"],
        ),
    ]
}

/// The two students the EventHub backend seeds
#[must_use]
pub fn students() -> Vec<User> {
    vec![
        User {
            id: UserId(1),
            name: "John Doe".to_string(),
            email: "john@student.edu".to_string(),
            student_id: Some("STU001".to_string()),
            department: Some("Computer Science".to_string()),
            graduation_year: Some(2026),
            phone: Some("+1-555-0101".to_string()),
            created_at: None,
        },
        User {
            id: UserId(2),
            name: "Jane Smith".to_string(),
            email: "jane@student.edu".to_string(),
            student_id: Some("STU002".to_string()),
            department: Some("Business Administration".to_string()),
            graduation_year: Some(2025),
            phone: Some("+1-555-0102".to_string()),
            created_at: None,
        },
    ]
}

/// A valid registration form submission
#[must_use]
pub fn new_student() -> NewUser {
    NewUser {
        name: "Ada Lovelace".to_string(),
        email: "ada@student.edu".to_string(),
        student_id: "STU042".to_string(),
        department: "Science".to_string(),
        graduation_year: 2026,
        phone: None,
    }
}
