use crate::catalog::item::{CatalogItem, Category};

/// The catalog shipped with the app
pub fn builtin_items() -> Vec<CatalogItem> {
    use Category::*;

    vec![
        CatalogItem::new(
            "comm-1",
            "Active Listening",
            "Practice giving your full attention when others speak. Focus on understanding before responding, ask clarifying questions, and reflect back what you heard.",
            Communication,
        ),
        CatalogItem::new(
            "comm-2",
            "Clear Email Writing",
            "Write emails with clear subject lines, concise messaging, and actionable next steps. Use bullet points and avoid jargon.",
            Communication,
        ),
        CatalogItem::new(
            "comm-3",
            "Constructive Feedback",
            "Learn to give feedback that focuses on specific behaviors, includes positive elements, and offers actionable suggestions for improvement.",
            Communication,
        ),
        CatalogItem::new(
            "comm-4",
            "Non-Verbal Communication",
            "Be aware of your body language, maintain appropriate eye contact, and use gestures that support your message.",
            Communication,
        ),
        CatalogItem::new(
            "lead-1",
            "Decision Making",
            "Practice making timely decisions by gathering relevant information, considering alternatives, and taking calculated risks.",
            Leadership,
        ),
        CatalogItem::new(
            "lead-2",
            "Delegation",
            "Learn to assign tasks effectively by matching tasks to team members' strengths and providing clear expectations.",
            Leadership,
        ),
        CatalogItem::new(
            "lead-3",
            "Inspiring Others",
            "Motivate your team by sharing a compelling vision, recognizing achievements, and leading by example.",
            Leadership,
        ),
        CatalogItem::new(
            "time-1",
            "Priority Setting",
            "Use the Eisenhower Matrix to categorize tasks by urgency and importance. Focus on important but not urgent tasks.",
            TimeManagement,
        ),
        CatalogItem::new(
            "time-2",
            "Time Blocking",
            "Schedule specific time blocks for different types of work. Protect these blocks and avoid multitasking.",
            TimeManagement,
        ),
        CatalogItem::new(
            "time-3",
            "Energy Management",
            "Identify your peak energy hours and schedule your most important work during these times.",
            TimeManagement,
        ),
        CatalogItem::new(
            "eq-1",
            "Self-Awareness",
            "Practice recognizing your emotions as they occur and understanding what triggers them.",
            EmotionalIntelligence,
        ),
        CatalogItem::new(
            "eq-2",
            "Empathy",
            "Try to understand others' perspectives by asking questions and observing emotional cues.",
            EmotionalIntelligence,
        ),
        CatalogItem::new(
            "eq-3",
            "Emotional Regulation",
            "Practice pausing before reacting to strong emotions. Use breathing techniques or take a brief walk.",
            EmotionalIntelligence,
        ),
        CatalogItem::new(
            "prob-1",
            "Root Cause Analysis",
            "When facing a problem, ask \"why\" five times to dig deeper and find the underlying cause.",
            ProblemSolving,
        ),
        CatalogItem::new(
            "prob-2",
            "Creative Brainstorming",
            "Generate multiple solutions without judging them initially. Build on others' ideas and think outside the box.",
            ProblemSolving,
        ),
        CatalogItem::new(
            "team-1",
            "Collaboration",
            "Actively contribute to team goals, share knowledge freely, and support team members when they need help.",
            Teamwork,
        ),
        CatalogItem::new(
            "team-2",
            "Conflict Resolution",
            "Address conflicts early, focus on interests rather than positions, and find win-win solutions.",
            Teamwork,
        ),
        CatalogItem::new(
            "adapt-1",
            "Flexibility",
            "Embrace change by staying curious, asking questions, and looking for opportunities in new situations.",
            Adaptability,
        ),
        CatalogItem::new(
            "adapt-2",
            "Learning Agility",
            "Continuously seek to learn new skills, ask for feedback, and apply lessons from failures.",
            Adaptability,
        ),
        CatalogItem::new(
            "crit-1",
            "Question Assumptions",
            "Challenge your own and others' assumptions by asking \"What if?\" and \"How do we know this is true?\"",
            CriticalThinking,
        ),
        CatalogItem::new(
            "crit-2",
            "Evidence Evaluation",
            "Learn to assess the quality and reliability of information sources before making decisions.",
            CriticalThinking,
        ),
        CatalogItem::new(
            "creat-1",
            "Idea Generation",
            "Set aside time for creative thinking. Use techniques like mind mapping or random word association.",
            Creativity,
        ),
        CatalogItem::new(
            "creat-2",
            "Innovation",
            "Look for ways to improve existing processes or products. Ask \"How might we do this differently?\"",
            Creativity,
        ),
        CatalogItem::new(
            "mind-1",
            "Present Moment Awareness",
            "Practice staying focused on the current task without getting distracted by past or future concerns.",
            Mindfulness,
        ),
        CatalogItem::new(
            "mind-2",
            "Stress Management",
            "Use breathing exercises, short meditation, or mindful walking to manage stress throughout the day.",
            Mindfulness,
        ),
    ]
}
