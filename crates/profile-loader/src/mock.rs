//! Bundled mock dataset used when no data directory is given.

use crate::types::*;

fn message(id: MessageId, sender: Sender, text: &str, time: &str) -> ChatMessage {
    ChatMessage {
        id,
        sender,
        text: text.to_string(),
        time: time.to_string(),
    }
}

/// The five developer profiles shown on the discovery deck
pub fn mock_candidates() -> Vec<Candidate> {
    vec![
        Candidate::new(
            1,
            "Alex Johnson",
            "Full-stack developer with 5 years of experience in React and Node.js",
        )
        .with_interests(["React", "TypeScript", "GraphQL", "Node.js"])
        .with_socials("alexjohnson", "alex-johnson"),
        Candidate::new(
            2,
            "Sarah Chen",
            "Frontend developer specializing in UI/UX and accessibility",
        )
        .with_interests(["Vue.js", "CSS", "Accessibility", "Design Systems"])
        .with_socials("sarahchen", "sarah-chen"),
        Candidate::new(
            3,
            "Miguel Rodriguez",
            "Backend engineer with expertise in distributed systems",
        )
        .with_interests(["Go", "Kubernetes", "Microservices", "System Design"])
        .with_socials("miguelrodriguez", "miguel-rodriguez"),
        Candidate::new(
            4,
            "Priya Patel",
            "Machine learning engineer focused on NLP applications",
        )
        .with_interests(["Python", "TensorFlow", "NLP", "Data Science"])
        .with_socials("priyapatel", "priya-patel"),
        Candidate::new(5, "David Kim", "DevOps engineer with a passion for automation")
            .with_interests(["AWS", "Terraform", "CI/CD", "Docker"])
            .with_socials("davidkim", "david-kim"),
    ]
}

/// Existing conversations, keyed by the candidate they are with
pub fn mock_chats() -> Vec<ChatThread> {
    use Sender::{Them, You};

    vec![
        ChatThread {
            id: 2,
            name: "Sarah Chen".to_string(),
            image: None,
            unread: 2,
            messages: vec![
                message(1, Them, "Hi there! I saw your profile and I'm impressed with your React work.", "10:15 AM"),
                message(2, You, "Thanks! I've been working on some interesting projects lately.", "10:20 AM"),
                message(3, Them, "I'm working on a new project that might interest you. It's a developer networking platform.", "10:25 AM"),
                message(4, You, "That sounds like a great project idea!", "10:30 AM"),
            ],
        },
        ChatThread {
            id: 3,
            name: "Miguel Rodriguez".to_string(),
            image: None,
            unread: 0,
            messages: vec![
                message(1, Them, "Hey, have you worked with Kubernetes before?", "Yesterday"),
                message(2, You, "Yes, I've set up a few clusters for my projects.", "Yesterday"),
                message(3, Them, "Great! I'm trying to optimize our deployment pipeline.", "Yesterday"),
                message(4, You, "I can help with that. Let me know what you're working on specifically.", "Yesterday"),
                message(5, Them, "Can you share that article about microservices?", "Yesterday"),
            ],
        },
    ]
}

/// A ready-made index over the mock deck and chats
pub fn mock_index() -> ProfileIndex {
    let mut index = ProfileIndex::new();
    for candidate in mock_candidates() {
        index.insert_candidate(candidate);
    }
    for thread in mock_chats() {
        index.insert_chat(thread);
    }
    index
}
