//! Fixed message tables

/// Celebrations shown when the score hits an exact value
pub const MILESTONES: &[(u32, &str)] = &[
    (5, "Traffic Routing Initiated! 🚀"),
    (10, "Cache Status: HIT! ⚡"),
    (15, "WAF Deployed! 🛡️"),
    (20, "CDN Nodes Expanded! 🌍"),
    (25, "Argo Smart Routing Enabled! 🧠"),
    (30, "DDoS Protection Active! 🧱"),
    (40, "SSL Handshake Complete! 🤝"),
    (50, "100% Uptime Achievement! 🏆"),
    (100, "Cloudflare God Mode! 🌩️"),
];

/// One of these is picked at random when the logo hits the floor
pub const GAME_OVER_MESSAGES: &[&str] = &[
    "Error 502: Bad Gamer Gateway",
    "Error 522: Connection Timed Out (Reflexes too slow)",
    "DDoS Attack Detected: Gravity overwhelming",
    "Cache Miss: You missed the click",
    "Rerouting traffic... straight to the floor",
    "Worker CPU Limit Exceeded",
    "DNS Probe Finished: No Skills Found",
    "Host Error: Gravity wins this round",
    "Packet Loss: 100%",
    "System status: Degraded Performance",
];

/// Milestone message for an exact score, if any
pub fn milestone_message(score: u32) -> Option<&'static str> {
    MILESTONES
        .iter()
        .find(|(s, _)| *s == score)
        .map(|(_, msg)| *msg)
}
