use std::fs;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use crate::dto::candidate_dto::{CreateCandidatePayload, ProfileUpdatePayload};
use crate::dto::messaging_dto::{ScheduleInterviewPayload, SendMessagesPayload};
use crate::dto::template_dto::UpsertTemplatePayload;
use crate::models::audit_log::{AuditKind, AuditLog};
use crate::models::candidate::Candidate;
use crate::models::interview::InterviewEvent;
use crate::models::message::{Channel, Message};
use crate::models::template::Template;
use crate::services::sentiment::{self, SentimentAnalysis};
use crate::services::template_engine;
use crate::utils::time;
use crate::utils::token::new_id;

/// Audit reads return at most this many entries; the underlying log grows
/// unbounded.
pub const AUDIT_READ_LIMIT: usize = 200;

const DEFAULT_BOOKING_LINK: &str = "https://cal.example.com/book";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreInner {
    /// Insertion order, which is also the listing order.
    candidates: Vec<Candidate>,
    templates: Vec<Template>,
    /// Newest first.
    audits: Vec<AuditLog>,
}

impl StoreInner {
    fn candidate(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    fn candidate_mut(&mut self, id: &str) -> Option<&mut Candidate> {
        self.candidates.iter_mut().find(|c| c.id == id)
    }

    fn push_log(&mut self, kind: AuditKind, message: String, meta: Option<JsonValue>) {
        self.audits.insert(
            0,
            AuditLog {
                id: new_id("log"),
                kind,
                message,
                meta,
                created_at: time::now(),
            },
        );
    }
}

/// Single source of truth for candidates, templates and the audit log.
///
/// All reads and writes go through one `RwLock`, so at most one mutator
/// runs at a time. Mutations are snapshotted to the data file (when
/// configured) after the in-memory change completes.
pub struct Store {
    inner: RwLock<StoreInner>,
    data_file: Option<PathBuf>,
}

impl Store {
    /// Loads all records from `data_file` when it exists; otherwise starts
    /// empty, optionally seeded with the demo templates and candidate.
    pub fn open(data_file: Option<PathBuf>, seed_demo: bool) -> anyhow::Result<Self> {
        let inner = match &data_file {
            Some(path) if path.exists() => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading data file {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing data file {}", path.display()))?
            }
            _ => {
                let mut inner = StoreInner::default();
                if seed_demo {
                    seed_demo_data(&mut inner)?;
                }
                inner
            }
        };
        Ok(Self {
            inner: RwLock::new(inner),
            data_file,
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Whole-state snapshot, written after the in-memory mutation it
    /// follows. A failed write keeps the mutation and logs a warning.
    fn persist(&self, inner: &StoreInner) {
        let Some(path) = &self.data_file else { return };
        let result = serde_json::to_string_pretty(inner)
            .map_err(anyhow::Error::from)
            .and_then(|payload| fs::write(path, payload).map_err(anyhow::Error::from));
        if let Err(e) = result {
            tracing::warn!(error = ?e, path = %path.display(), "failed to persist store snapshot");
        }
    }

    pub fn list_candidates(&self, include_deleted: bool) -> Vec<Candidate> {
        self.read()
            .candidates
            .iter()
            .filter(|c| include_deleted || !c.is_deleted())
            .cloned()
            .collect()
    }

    pub fn get_candidate(&self, id: &str) -> Option<Candidate> {
        self.read().candidate(id).cloned()
    }

    pub fn create_candidate(&self, payload: CreateCandidatePayload) -> Candidate {
        let now = time::now();
        let candidate = Candidate {
            id: new_id("cand"),
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            location: payload.location,
            linkedin_url: payload.linkedin_url,
            role_title: payload.role_title,
            resume_url: payload.resume_url,
            portfolio_links: payload.portfolio_links,
            certificates: payload.certificates,
            skills: payload.skills,
            notes: payload.notes,
            public_feedback: None,
            stage: payload.stage.unwrap_or_default(),
            timeline: Vec::new(),
            messages: Vec::new(),
            gdpr_consent: false,
            data_retention_consent: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let mut inner = self.write();
        inner.candidates.push(candidate.clone());
        inner.push_log(
            AuditKind::Candidate,
            format!("Created candidate {}", candidate.id),
            Some(json!({ "candidateId": candidate.id })),
        );
        self.persist(&inner);
        candidate
    }

    /// Re-invocation on an already-deleted candidate re-stamps `deleted_at`.
    pub fn soft_delete_candidate(&self, id: &str) -> bool {
        let mut inner = self.write();
        let Some(candidate) = inner.candidate_mut(id) else {
            return false;
        };
        let now = time::now();
        candidate.deleted_at = Some(now);
        candidate.updated_at = now;
        inner.push_log(
            AuditKind::Gdpr,
            format!("Soft-deleted candidate {}", id),
            Some(json!({ "candidateId": id })),
        );
        self.persist(&inner);
        true
    }

    pub fn list_templates(&self) -> Vec<Template> {
        let mut templates: Vec<Template> = self.read().templates.to_vec();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        templates
    }

    pub fn upsert_template(&self, payload: UpsertTemplatePayload) -> Template {
        let mut inner = self.write();
        let existing_id = payload
            .id
            .as_ref()
            .filter(|id| inner.templates.iter().any(|t| &t.id == *id))
            .cloned();
        let record = Template {
            id: existing_id.clone().unwrap_or_else(|| new_id("tmpl")),
            name: payload.name,
            subject: payload.subject,
            body: payload.body,
            updated_at: time::now(),
        };
        match existing_id {
            Some(id) => {
                if let Some(slot) = inner.templates.iter_mut().find(|t| t.id == id) {
                    *slot = record.clone();
                }
            }
            None => inner.templates.push(record.clone()),
        }
        inner.push_log(
            AuditKind::Template,
            format!("Upserted template {}", record.id),
            Some(json!({ "templateId": record.id })),
        );
        self.persist(&inner);
        record
    }

    pub fn schedule_interview(&self, payload: ScheduleInterviewPayload) -> Option<InterviewEvent> {
        let mut inner = self.write();
        let pos = inner
            .candidates
            .iter()
            .position(|c| c.id == payload.candidate_id)?;

        let now = time::now();
        let event = InterviewEvent {
            id: new_id("evt"),
            candidate_id: payload.candidate_id.clone(),
            title: payload.title,
            start: payload.start,
            end: payload.end,
            stakeholders: payload.stakeholders,
            link: payload
                .link
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| format!("https://cal.example.com/{}", new_id("meet"))),
            created_at: now,
        };

        let candidate = &mut inner.candidates[pos];
        candidate.timeline.insert(0, event.clone());
        candidate.updated_at = now;
        // Fires on every successful call, regardless of existing interviews.
        candidate.stage = candidate.stage.next_on_schedule();
        let candidate_id = candidate.id.clone();

        inner.push_log(
            AuditKind::Schedule,
            format!("Scheduled interview for {}", candidate_id),
            Some(json!({ "candidateId": candidate_id, "eventId": event.id })),
        );
        self.persist(&inner);
        Some(event)
    }

    pub fn send_messages(&self, payload: SendMessagesPayload) -> Option<Vec<Message>> {
        let mut inner = self.write();
        let pos = inner
            .candidates
            .iter()
            .position(|c| c.id == payload.candidate_id)?;
        let candidate = inner.candidates[pos].clone();
        let template = payload
            .template_id
            .as_ref()
            .and_then(|tid| inner.templates.iter().find(|t| &t.id == tid))
            .cloned();

        let vars = build_send_vars(&candidate, payload.vars.as_ref());

        // Explicit body wins when it renders non-empty, then the template body.
        let content = first_non_empty(
            payload
                .body
                .as_deref()
                .map(|b| template_engine::render(b, &vars)),
            template
                .as_ref()
                .map(|t| template_engine::render(&t.body, &vars)),
        );
        // Template subjects are used verbatim; only an explicit subject is
        // rendered (matches the prototype this replaces).
        let subject = first_non_empty(
            payload
                .subject
                .as_deref()
                .map(|s| template_engine::render(s, &vars)),
            template.as_ref().and_then(|t| t.subject.clone()),
        );

        let now = time::now();
        let outgoing: Vec<Message> = payload
            .channels
            .iter()
            .map(|channel| {
                // Scored per output, not cached, even though content is shared.
                let analysis = sentiment::analyze(&content);
                Message {
                    id: new_id("msg"),
                    candidate_id: candidate.id.clone(),
                    channel: *channel,
                    template_id: template.as_ref().map(|t| t.id.clone()),
                    subject: Some(subject.clone()),
                    content: content.clone(),
                    created_at: now,
                    meta: None,
                    sentiment: analysis.sentiment,
                    escalated: analysis.escalated,
                }
            })
            .collect();

        let slot = &mut inner.candidates[pos];
        // Whole batch lands at the front, preserving channel order.
        for message in outgoing.iter().rev() {
            slot.messages.insert(0, message.clone());
        }
        slot.updated_at = now;

        inner.push_log(
            AuditKind::Send,
            format!("Sent {} message(s) to {}", outgoing.len(), candidate.id),
            Some(json!({
                "candidateId": candidate.id,
                "channels": payload.channels,
                "templateId": template.as_ref().map(|t| t.id.clone()),
            })),
        );
        self.persist(&inner);
        Some(outgoing)
    }

    /// Inbound candidate reply, always on the email channel. Escalated
    /// replies leave a "send" audit entry for human review.
    pub fn record_reply(&self, candidate_id: &str, content: &str) -> Option<SentimentAnalysis> {
        let mut inner = self.write();
        let candidate = inner.candidate_mut(candidate_id)?;
        let analysis = sentiment::analyze(content);
        let now = time::now();
        candidate.messages.insert(
            0,
            Message {
                id: new_id("msg"),
                candidate_id: candidate_id.to_string(),
                channel: Channel::Email,
                template_id: None,
                subject: None,
                content: content.to_string(),
                created_at: now,
                meta: None,
                sentiment: analysis.sentiment,
                escalated: analysis.escalated,
            },
        );
        candidate.updated_at = now;
        if analysis.escalated {
            inner.push_log(
                AuditKind::Send,
                format!("Escalation: negative reply from {}", candidate_id),
                Some(json!({ "candidateId": candidate_id })),
            );
        }
        self.persist(&inner);
        Some(analysis)
    }

    pub fn update_profile(
        &self,
        candidate_id: &str,
        updates: ProfileUpdatePayload,
    ) -> Option<Candidate> {
        let mut inner = self.write();
        let candidate = inner.candidate_mut(candidate_id)?;
        if let Some(v) = updates.first_name {
            candidate.first_name = v;
        }
        if let Some(v) = updates.last_name {
            candidate.last_name = v;
        }
        if let Some(v) = updates.email {
            candidate.email = v;
        }
        if let Some(v) = updates.phone {
            candidate.phone = Some(v);
        }
        if let Some(v) = updates.location {
            candidate.location = Some(v);
        }
        if let Some(v) = updates.linkedin_url {
            candidate.linkedin_url = Some(v);
        }
        if let Some(v) = updates.skills {
            candidate.skills = v;
        }
        if let Some(v) = updates.portfolio_links {
            candidate.portfolio_links = Some(v);
        }
        if let Some(v) = updates.certificates {
            candidate.certificates = Some(v);
        }
        if let Some(v) = updates.gdpr_consent {
            candidate.gdpr_consent = v;
        }
        if let Some(v) = updates.data_retention_consent {
            candidate.data_retention_consent = v;
        }
        candidate.updated_at = time::now();
        let updated = candidate.clone();
        self.persist(&inner);
        Some(updated)
    }

    pub fn update_consent(
        &self,
        candidate_id: &str,
        gdpr_consent: Option<bool>,
        data_retention_consent: Option<bool>,
    ) -> Option<(bool, bool)> {
        let mut inner = self.write();
        let candidate = inner.candidate_mut(candidate_id)?;
        if let Some(v) = gdpr_consent {
            candidate.gdpr_consent = v;
        }
        if let Some(v) = data_retention_consent {
            candidate.data_retention_consent = v;
        }
        candidate.updated_at = time::now();
        let result = (candidate.gdpr_consent, candidate.data_retention_consent);
        inner.push_log(
            AuditKind::Gdpr,
            format!("Consent updated for candidate {}", candidate_id),
            Some(json!({
                "candidateId": candidate_id,
                "gdpr_consent": gdpr_consent,
                "data_retention_consent": data_retention_consent,
            })),
        );
        self.persist(&inner);
        Some(result)
    }

    /// GDPR data export grouping everything the system holds on a candidate.
    pub fn export_candidate_data(&self, candidate_id: &str) -> Option<JsonValue> {
        let mut inner = self.write();
        let candidate = inner.candidate(candidate_id)?.clone();
        let export = json!({
            "personal_info": {
                "name": candidate.full_name(),
                "email": candidate.email,
                "phone": candidate.phone,
                "location": candidate.location,
                "linkedin_url": candidate.linkedin_url,
            },
            "application_data": {
                "role_title": candidate.role_title,
                "skills": candidate.skills,
                "stage": candidate.stage,
                "created_at": candidate.created_at,
                "updated_at": candidate.updated_at,
            },
            "communications": candidate.messages,
            "interviews": candidate.timeline,
            "documents": {
                "resume_url": candidate.resume_url,
                "portfolio_links": candidate.portfolio_links,
                "certificates": candidate.certificates,
            },
            "consent": {
                "gdpr_consent": candidate.gdpr_consent,
                "data_retention_consent": candidate.data_retention_consent,
            },
        });
        inner.push_log(
            AuditKind::Gdpr,
            format!("Data export requested for candidate {}", candidate_id),
            Some(json!({ "candidateId": candidate_id })),
        );
        self.persist(&inner);
        Some(export)
    }

    /// Candidate-portal lookup by email. The optional access code is
    /// accepted for interface compatibility but no code is ever stored, so
    /// it cannot reject a match.
    pub fn authenticate_candidate(&self, email: &str, _code: Option<&str>) -> Option<String> {
        let normalized = email.trim().to_lowercase();
        self.read()
            .candidates
            .iter()
            .find(|c| !c.is_deleted() && c.email.to_lowercase() == normalized)
            .map(|c| c.id.clone())
    }

    pub fn get_audits(&self) -> Vec<AuditLog> {
        self.read()
            .audits
            .iter()
            .take(AUDIT_READ_LIMIT)
            .cloned()
            .collect()
    }

    pub fn log(&self, kind: AuditKind, message: impl Into<String>, meta: Option<JsonValue>) {
        let mut inner = self.write();
        inner.push_log(kind, message.into(), meta);
        self.persist(&inner);
    }

    /// Prototype admin auth: fixed credential check, opaque token, audited
    /// either way. The token is not verified anywhere else.
    pub fn admin_login(&self, email: &str, password: &str) -> Option<String> {
        let config = crate::config::get_config();
        let ok = email == config.admin_email && password == config.admin_password;
        let mut inner = self.write();
        let token = if ok {
            let token = format!("admin_{}", crate::utils::token::generate_access_token(24));
            inner.push_log(
                AuditKind::Auth,
                format!("Admin login success for {}", email),
                Some(json!({ "email": email })),
            );
            Some(token)
        } else {
            inner.push_log(
                AuditKind::Auth,
                format!("Admin login failed for {}", email),
                Some(json!({ "email": email })),
            );
            None
        };
        self.persist(&inner);
        token
    }
}

/// Variable merge for outbound sends, lowest to highest precedence:
/// candidate fields, computed defaults, caller vars. Later keys override
/// earlier ones, so a caller var shadows both the defaults and any
/// same-named candidate field.
fn build_send_vars(candidate: &Candidate, caller_vars: Option<&JsonValue>) -> JsonValue {
    let mut map = match serde_json::to_value(candidate) {
        Ok(JsonValue::Object(m)) => m,
        _ => serde_json::Map::new(),
    };
    map.insert(
        "candidate".to_string(),
        serde_json::to_value(candidate).unwrap_or(JsonValue::Null),
    );
    map.insert(
        "stage".to_string(),
        serde_json::to_value(candidate.stage).unwrap_or(JsonValue::Null),
    );

    let caller = caller_vars
        .and_then(|v| v.as_object())
        .cloned()
        .unwrap_or_default();

    map.insert(
        "interviewer_names".to_string(),
        caller
            .get("interviewer_names")
            .filter(|v| is_truthy(v))
            .cloned()
            .unwrap_or_else(|| JsonValue::String("TBD".to_string())),
    );
    map.insert(
        "interview_link".to_string(),
        caller
            .get("interview_link")
            .filter(|v| is_truthy(v))
            .cloned()
            .unwrap_or_else(|| JsonValue::String(DEFAULT_BOOKING_LINK.to_string())),
    );
    let feedback = caller
        .get("feedback")
        .filter(|v| is_truthy(v))
        .map(|v| format!("\n\nFeedback: {}", template_engine::display_value(v)))
        .unwrap_or_default();
    map.insert("feedback".to_string(), JsonValue::String(feedback));

    // Caller vars last: highest precedence on key collision.
    map.extend(caller);
    JsonValue::Object(map)
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        _ => true,
    }
}

fn first_non_empty(primary: Option<String>, fallback: Option<String>) -> String {
    match primary {
        Some(s) if !s.is_empty() => s,
        _ => fallback.unwrap_or_default(),
    }
}

/// Demo content for a fresh store: the three canonical templates plus one
/// candidate with sample history. The sample messages are the only place a
/// "positive" sentiment label exists; the classifier never produces it.
fn seed_demo_data(inner: &mut StoreInner) -> anyhow::Result<()> {
    let now = time::now();

    for (id, name, subject, body) in [
        (
            "tmpl_invite",
            "Interview Invite",
            "Interview for {{role_title}}",
            "Hi {{first_name}},\n\nWe'd love to invite you to interview for {{role_title}}.\nInterviewers: {{interviewer_names}}\nPlease use this link to book a time: {{interview_link}}\n\nBest,\nTalentLink Team",
        ),
        (
            "tmpl_reject",
            "Rejection (Empathetic)",
            "Update on your application for {{role_title}}",
            "Hi {{first_name}},\n\nThank you for taking the time to interview with us. After careful consideration, we won't be moving forward.\nWe truly appreciate your interest.{{feedback}}\n\nWishing you the best,\nTalentLink Team",
        ),
        (
            "tmpl_status",
            "Status Update",
            "Your application status: {{stage}}",
            "Hi {{first_name}},\n\nA quick update: your application is now at the \"{{stage}}\" stage. We'll keep you posted on the next steps.\n\nThanks,\nTalentLink",
        ),
    ] {
        inner.templates.push(Template {
            id: id.to_string(),
            name: name.to_string(),
            subject: Some(subject.to_string()),
            body: body.to_string(),
            updated_at: now,
        });
    }

    let candidate_id = "cand_001".to_string();
    let sample_messages = vec![
        Message {
            id: "msg_001".to_string(),
            candidate_id: candidate_id.clone(),
            channel: Channel::Email,
            template_id: Some("tmpl_invite".to_string()),
            subject: Some("Welcome to TalentLink!".to_string()),
            content: "Hi Alex, welcome to our hiring process for the Senior Frontend Engineer position. We're excited to have you as a candidate!".to_string(),
            created_at: time::from_rfc3339("2024-01-10T10:00:00Z")?,
            meta: None,
            sentiment: crate::models::message::Sentiment::Positive,
            escalated: false,
        },
        Message {
            id: "msg_002".to_string(),
            candidate_id: candidate_id.clone(),
            channel: Channel::Sms,
            template_id: None,
            subject: Some("Interview Reminder".to_string()),
            content: "Hi Alex! Just a friendly reminder about your technical interview tomorrow at 2 PM. The meeting link is in your email. Good luck!".to_string(),
            created_at: time::from_rfc3339("2024-01-14T16:00:00Z")?,
            meta: None,
            sentiment: crate::models::message::Sentiment::Positive,
            escalated: false,
        },
        Message {
            id: "msg_003".to_string(),
            candidate_id: candidate_id.clone(),
            channel: Channel::Linkedin,
            template_id: None,
            subject: Some("Great to connect!".to_string()),
            content: "Alex, it was great meeting you during the screening call. Looking forward to the next steps in the process!".to_string(),
            created_at: time::from_rfc3339("2024-01-12T14:30:00Z")?,
            meta: None,
            sentiment: crate::models::message::Sentiment::Positive,
            escalated: false,
        },
    ];
    let sample_interview = InterviewEvent {
        id: "evt_001".to_string(),
        candidate_id: candidate_id.clone(),
        title: "Technical Interview - Frontend Skills".to_string(),
        start: time::from_rfc3339("2024-01-15T14:00:00Z")?,
        end: time::from_rfc3339("2024-01-15T15:30:00Z")?,
        stakeholders: vec![
            "John Smith (Senior Engineer)".to_string(),
            "Sarah Wilson (Engineering Manager)".to_string(),
        ],
        link: "https://meet.google.com/abc-def-ghi".to_string(),
        created_at: time::from_rfc3339("2024-01-10T12:00:00Z")?,
    };

    inner.candidates.push(Candidate {
        id: candidate_id,
        first_name: "Alex".to_string(),
        last_name: "Johnson".to_string(),
        email: "alex.johnson@example.com".to_string(),
        phone: Some("+1 555-0100".to_string()),
        location: Some("San Francisco, CA".to_string()),
        linkedin_url: Some("https://linkedin.com/in/alexjohnson".to_string()),
        role_title: "Senior Frontend Engineer".to_string(),
        resume_url: Some("/resume-placeholder.jpg".to_string()),
        portfolio_links: Some(vec![
            "https://alexjohnson.dev".to_string(),
            "https://github.com/alexjohnson".to_string(),
        ]),
        certificates: Some(vec![
            "AWS Certified Developer".to_string(),
            "React Professional Certificate".to_string(),
        ]),
        skills: vec![
            "React".to_string(),
            "TypeScript".to_string(),
            "Next.js".to_string(),
            "Accessibility".to_string(),
            "Testing".to_string(),
        ],
        notes: Some("Strong UI/UX sensibility. Good communication.".to_string()),
        public_feedback: Some(
            "Excellent technical skills and great cultural fit. Looking forward to next steps."
                .to_string(),
        ),
        stage: crate::models::candidate::Stage::Screening,
        timeline: vec![sample_interview],
        messages: sample_messages,
        gdpr_consent: true,
        data_retention_consent: true,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::Stage;
    use crate::models::message::Sentiment;

    fn empty_store() -> Store {
        Store::open(None, false).expect("open in-memory store")
    }

    fn create_payload(email: &str) -> CreateCandidatePayload {
        CreateCandidatePayload {
            first_name: "Jamie".into(),
            last_name: "Rivera".into(),
            email: email.into(),
            phone: None,
            location: None,
            linkedin_url: None,
            role_title: "Backend Engineer".into(),
            resume_url: None,
            portfolio_links: None,
            certificates: None,
            skills: vec!["Rust".into()],
            notes: None,
            stage: None,
        }
    }

    fn schedule_payload(candidate_id: &str) -> ScheduleInterviewPayload {
        ScheduleInterviewPayload {
            candidate_id: candidate_id.into(),
            title: "Tech screen".into(),
            start: time::from_rfc3339("2026-09-01T14:00:00Z").unwrap(),
            end: time::from_rfc3339("2026-09-01T15:00:00Z").unwrap(),
            stakeholders: vec!["Dana (EM)".into()],
            link: None,
        }
    }

    fn send_payload(candidate_id: &str, channels: Vec<Channel>) -> SendMessagesPayload {
        SendMessagesPayload {
            candidate_id: candidate_id.into(),
            template_id: None,
            channels,
            subject: Some("Hello {{first_name}}".into()),
            body: Some("Hi {{first_name}}, update on {{role_title}}.".into()),
            vars: None,
        }
    }

    #[test]
    fn create_candidate_defaults_and_audit() {
        let store = empty_store();
        let c = store.create_candidate(create_payload("jamie@example.com"));
        assert!(c.id.starts_with("cand_"));
        assert_eq!(c.stage, Stage::Applied);
        assert!(c.messages.is_empty());
        assert!(c.timeline.is_empty());
        let audits = store.get_audits();
        assert_eq!(audits.len(), 1);
        assert_eq!(audits[0].kind, AuditKind::Candidate);
    }

    #[test]
    fn soft_deleted_candidates_hidden_from_default_listing() {
        let store = empty_store();
        let c = store.create_candidate(create_payload("jamie@example.com"));
        assert!(store.soft_delete_candidate(&c.id));

        assert!(store.list_candidates(false).iter().all(|x| x.id != c.id));
        assert!(store.list_candidates(true).iter().any(|x| x.id == c.id));
        // Still addressable by id.
        let fetched = store.get_candidate(&c.id).unwrap();
        assert!(fetched.is_deleted());
    }

    #[test]
    fn soft_delete_unknown_id_returns_false() {
        let store = empty_store();
        assert!(!store.soft_delete_candidate("cand_missing"));
    }

    #[test]
    fn schedule_advances_stage_one_step_per_call() {
        let store = empty_store();
        let c = store.create_candidate(create_payload("jamie@example.com"));
        assert_eq!(c.stage, Stage::Applied);

        store.schedule_interview(schedule_payload(&c.id)).unwrap();
        assert_eq!(store.get_candidate(&c.id).unwrap().stage, Stage::Screening);

        store.schedule_interview(schedule_payload(&c.id)).unwrap();
        assert_eq!(store.get_candidate(&c.id).unwrap().stage, Stage::Interview);

        // Terminal for the heuristic: further calls leave stage unchanged.
        store.schedule_interview(schedule_payload(&c.id)).unwrap();
        let after = store.get_candidate(&c.id).unwrap();
        assert_eq!(after.stage, Stage::Interview);
        assert_eq!(after.timeline.len(), 3);
    }

    #[test]
    fn schedule_generates_link_when_absent() {
        let store = empty_store();
        let c = store.create_candidate(create_payload("jamie@example.com"));
        let event = store.schedule_interview(schedule_payload(&c.id)).unwrap();
        assert!(event.link.starts_with("https://cal.example.com/meet_"));

        let mut payload = schedule_payload(&c.id);
        payload.link = Some("https://meet.example.com/xyz".into());
        let event = store.schedule_interview(payload).unwrap();
        assert_eq!(event.link, "https://meet.example.com/xyz");
    }

    #[test]
    fn schedule_unknown_candidate_is_none() {
        let store = empty_store();
        assert!(store.schedule_interview(schedule_payload("cand_missing")).is_none());
    }

    #[test]
    fn send_fans_out_one_message_per_channel() {
        let store = empty_store();
        let c = store.create_candidate(create_payload("jamie@example.com"));
        let msgs = store
            .send_messages(send_payload(&c.id, vec![Channel::Email, Channel::Sms]))
            .unwrap();

        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].content, msgs[1].content);
        assert_eq!(msgs[0].subject, msgs[1].subject);
        assert_eq!(msgs[0].channel, Channel::Email);
        assert_eq!(msgs[1].channel, Channel::Sms);

        let stored = store.get_candidate(&c.id).unwrap();
        assert_eq!(stored.messages.len(), 2);
        assert_eq!(stored.messages[0].id, msgs[0].id);

        let sends: Vec<_> = store
            .get_audits()
            .into_iter()
            .filter(|a| a.kind == AuditKind::Send)
            .collect();
        assert_eq!(sends.len(), 1);
    }

    #[test]
    fn send_renders_candidate_fields_into_body() {
        let store = empty_store();
        let c = store.create_candidate(create_payload("jamie@example.com"));
        let msgs = store
            .send_messages(send_payload(&c.id, vec![Channel::Email]))
            .unwrap();
        assert_eq!(msgs[0].content, "Hi Jamie, update on Backend Engineer.");
        assert_eq!(msgs[0].subject.as_deref(), Some("Hello Jamie"));
    }

    #[test]
    fn caller_vars_override_candidate_fields_and_defaults() {
        let store = empty_store();
        let c = store.create_candidate(create_payload("jamie@example.com"));
        let mut payload = send_payload(&c.id, vec![Channel::Email]);
        payload.body = Some("{{first_name}} / {{interviewer_names}} / {{interview_link}}".into());
        payload.vars = Some(json!({
            "first_name": "Overridden",
            "interviewer_names": "Kim, Lee",
        }));
        let msgs = store.send_messages(payload).unwrap();
        assert_eq!(
            msgs[0].content,
            "Overridden / Kim, Lee / https://cal.example.com/book"
        );
    }

    #[test]
    fn explicit_body_wins_over_template_body() {
        let store = empty_store();
        let c = store.create_candidate(create_payload("jamie@example.com"));
        let tmpl = store.upsert_template(UpsertTemplatePayload {
            id: None,
            name: "Ping".into(),
            subject: Some("From template {{first_name}}".into()),
            body: "Template body for {{first_name}}".into(),
        });

        let mut payload = send_payload(&c.id, vec![Channel::Email]);
        payload.template_id = Some(tmpl.id.clone());
        let msgs = store.send_messages(payload).unwrap();
        assert_eq!(msgs[0].content, "Hi Jamie, update on Backend Engineer.");
        assert_eq!(msgs[0].template_id.as_deref(), Some(tmpl.id.as_str()));

        // Without an explicit body the template body is rendered; the
        // template subject is carried over verbatim.
        let payload = SendMessagesPayload {
            candidate_id: c.id.clone(),
            template_id: Some(tmpl.id.clone()),
            channels: vec![Channel::Email],
            subject: None,
            body: None,
            vars: None,
        };
        let msgs = store.send_messages(payload).unwrap();
        assert_eq!(msgs[0].content, "Template body for Jamie");
        assert_eq!(msgs[0].subject.as_deref(), Some("From template {{first_name}}"));
    }

    #[test]
    fn send_scores_sentiment_per_message() {
        let store = empty_store();
        let c = store.create_candidate(create_payload("jamie@example.com"));
        let mut payload = send_payload(&c.id, vec![Channel::Email, Channel::Whatsapp]);
        payload.body = Some("This is urgent, we are unhappy with the delay".into());
        let msgs = store.send_messages(payload).unwrap();
        for m in &msgs {
            assert_eq!(m.sentiment, Sentiment::Negative);
            assert!(m.escalated);
        }
    }

    #[test]
    fn send_unknown_candidate_is_none() {
        let store = empty_store();
        assert!(store
            .send_messages(send_payload("cand_missing", vec![Channel::Email]))
            .is_none());
    }

    #[test]
    fn upsert_template_replaces_in_place() {
        let store = empty_store();
        let created = store.upsert_template(UpsertTemplatePayload {
            id: None,
            name: "Original".into(),
            subject: None,
            body: "Body".into(),
        });
        let replaced = store.upsert_template(UpsertTemplatePayload {
            id: Some(created.id.clone()),
            name: "X".into(),
            subject: None,
            body: "Y".into(),
        });
        assert_eq!(replaced.id, created.id);

        let templates = store.list_templates();
        let matching: Vec<_> = templates.iter().filter(|t| t.id == created.id).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].name, "X");
        assert_eq!(matching[0].body, "Y");
    }

    #[test]
    fn upsert_with_unknown_id_creates_fresh_record() {
        let store = empty_store();
        let t = store.upsert_template(UpsertTemplatePayload {
            id: Some("tmpl_ghost".into()),
            name: "New".into(),
            subject: None,
            body: "Body".into(),
        });
        assert_ne!(t.id, "tmpl_ghost");
        assert!(t.id.starts_with("tmpl_"));
    }

    #[test]
    fn templates_listed_sorted_by_name() {
        let store = empty_store();
        for name in ["Zeta", "Alpha", "Mid"] {
            store.upsert_template(UpsertTemplatePayload {
                id: None,
                name: name.into(),
                subject: None,
                body: "b".into(),
            });
        }
        let names: Vec<_> = store.list_templates().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn escalated_reply_writes_audit_entry() {
        let store = empty_store();
        let c = store.create_candidate(create_payload("jamie@example.com"));

        let calm = store.record_reply(&c.id, "Thanks, looking forward to it").unwrap();
        assert_eq!(calm.sentiment, Sentiment::Neutral);

        let heated = store
            .record_reply(&c.id, "I am angry and frustrated about this")
            .unwrap();
        assert!(heated.escalated);

        let escalations: Vec<_> = store
            .get_audits()
            .into_iter()
            .filter(|a| a.kind == AuditKind::Send)
            .collect();
        assert_eq!(escalations.len(), 1);

        let stored = store.get_candidate(&c.id).unwrap();
        assert_eq!(stored.messages.len(), 2);
        assert_eq!(stored.messages[0].channel, Channel::Email);
        assert!(stored.messages[0].escalated);
    }

    #[test]
    fn profile_update_touches_only_allowed_fields() {
        let store = empty_store();
        let c = store.create_candidate(create_payload("jamie@example.com"));
        let updated = store
            .update_profile(
                &c.id,
                ProfileUpdatePayload {
                    location: Some("Berlin".into()),
                    gdpr_consent: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.location.as_deref(), Some("Berlin"));
        assert!(updated.gdpr_consent);
        assert_eq!(updated.role_title, "Backend Engineer");
        assert_eq!(updated.stage, Stage::Applied);
    }

    #[test]
    fn consent_update_is_audited() {
        let store = empty_store();
        let c = store.create_candidate(create_payload("jamie@example.com"));
        let (gdpr, retention) = store.update_consent(&c.id, Some(true), None).unwrap();
        assert!(gdpr);
        assert!(!retention);
        assert!(store
            .get_audits()
            .iter()
            .any(|a| a.kind == AuditKind::Gdpr));
    }

    #[test]
    fn export_groups_all_candidate_data() {
        let store = empty_store();
        let c = store.create_candidate(create_payload("jamie@example.com"));
        let export = store.export_candidate_data(&c.id).unwrap();
        for key in [
            "personal_info",
            "application_data",
            "communications",
            "interviews",
            "documents",
            "consent",
        ] {
            assert!(export.get(key).is_some(), "missing export section {key}");
        }
        assert_eq!(export["personal_info"]["name"], "Jamie Rivera");
    }

    #[test]
    fn candidate_auth_normalizes_email_and_skips_deleted() {
        let store = empty_store();
        let c = store.create_candidate(create_payload("Jamie@Example.com"));
        assert_eq!(
            store.authenticate_candidate("  jamie@example.com ", None),
            Some(c.id.clone())
        );
        store.soft_delete_candidate(&c.id);
        assert_eq!(store.authenticate_candidate("jamie@example.com", None), None);
    }

    #[test]
    fn audit_reads_are_capped() {
        let store = empty_store();
        for i in 0..(AUDIT_READ_LIMIT + 10) {
            store.log(AuditKind::Candidate, format!("entry {i}"), None);
        }
        let audits = store.get_audits();
        assert_eq!(audits.len(), AUDIT_READ_LIMIT);
        // Newest first.
        assert_eq!(audits[0].message, format!("entry {}", AUDIT_READ_LIMIT + 9));
    }

    #[test]
    fn seeded_store_carries_demo_records() {
        let store = Store::open(None, true).expect("seeded store");
        let candidates = store.list_candidates(false);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, "cand_001");
        assert_eq!(candidates[0].stage, Stage::Screening);
        assert_eq!(candidates[0].messages.len(), 3);
        // Seeded messages are the only source of the "positive" label.
        assert!(candidates[0]
            .messages
            .iter()
            .all(|m| m.sentiment == Sentiment::Positive));
        assert_eq!(store.list_templates().len(), 3);
    }

    #[test]
    fn snapshot_round_trips_through_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talentlink.json");

        let store = Store::open(Some(path.clone()), false).expect("open");
        let c = store.create_candidate(create_payload("jamie@example.com"));
        store
            .send_messages(send_payload(&c.id, vec![Channel::Email]))
            .unwrap();
        drop(store);

        let reopened = Store::open(Some(path), false).expect("reopen");
        let loaded = reopened.get_candidate(&c.id).unwrap();
        assert_eq!(loaded.email, "jamie@example.com");
        assert_eq!(loaded.messages.len(), 1);
        assert_eq!(reopened.get_audits().len(), 2);
    }
}
