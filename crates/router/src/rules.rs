//! The static rule table: ordered `(predicate, answer)` pairs.
//!
//! Evaluation is first-match-wins in declaration order. The table is built
//! once at startup and shared read-only.

use crate::predicate::{NormalizedInput, Predicate};
use Predicate::{All, Any, Contains, Word};

/// One canned answer and the predicate that selects it.
#[derive(Debug, Clone)]
pub struct RuleEntry {
    pub name: &'static str,
    pub predicate: Predicate,
    response: String,
}

impl RuleEntry {
    /// The response is stored trimmed of surrounding whitespace.
    pub fn new(name: &'static str, predicate: Predicate, response: &str) -> Self {
        Self {
            name,
            predicate,
            response: response.trim().to_string(),
        }
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn matches(&self, input: &NormalizedInput) -> bool {
        self.predicate.matches(input)
    }
}

/// A keyword of a later rule that an earlier rule already captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shadowing {
    /// The rule whose keyword can never select it on its own
    pub rule: &'static str,
    pub term: &'static str,
    /// The earlier rule that wins instead
    pub shadowed_by: &'static str,
}

impl std::fmt::Display for Shadowing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' in rule '{}' is answered by earlier rule '{}'",
            self.term, self.rule, self.shadowed_by
        )
    }
}

/// Ordered, immutable list of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<RuleEntry>,
}

impl RuleTable {
    pub fn new(rules: Vec<RuleEntry>) -> Self {
        Self { rules }
    }

    /// The first rule whose predicate holds for `input`.
    pub fn find(&self, input: &NormalizedInput) -> Option<&RuleEntry> {
        self.rules.iter().find(|rule| rule.matches(input))
    }

    pub fn get(&self, name: &str) -> Option<&RuleEntry> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleEntry> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Keywords that can never reach their own rule when typed alone,
    /// because an earlier rule matches them first.
    pub fn shadowed_terms(&self) -> Vec<Shadowing> {
        let mut found = Vec::new();

        for (i, rule) in self.rules.iter().enumerate() {
            for term in rule.predicate.terms() {
                let probe = NormalizedInput::new(term);
                if let Some(earlier) = self.rules[..i].iter().find(|r| r.matches(&probe)) {
                    found.push(Shadowing {
                        rule: rule.name,
                        term,
                        shadowed_by: earlier.name,
                    });
                }
            }
        }

        found
    }

    /// The CSVTU rule set, in precedence order.
    pub fn builtin() -> Self {
        Self::new(vec![
            RuleEntry::new(
                "vice_chancellor",
                All(vec![
                    Any(vec![Word("vc"), Contains("vice chancellor")]),
                    Any(vec![Word("name"), Contains("who is")]),
                ]),
                VICE_CHANCELLOR,
            ),
            RuleEntry::new(
                "digivarsity",
                Predicate::contains_any(&[
                    "digivarsity",
                    "digi varsit",
                    "digiversity",
                    "digvarsity",
                    "student portal",
                    "exam form",
                    "sem form",
                    "student login",
                    "csvtu login",
                ]),
                DIGIVARSITY,
            ),
            RuleEntry::new(
                "e_library",
                Predicate::contains_any(&[
                    "e library",
                    "elibrary",
                    "e-library",
                    "library link",
                    "online library",
                    "digital library",
                ]),
                E_LIBRARY,
            ),
            RuleEntry::new(
                "results",
                // "rt " and "rv " keep their trailing space so words like "rtc" do not match
                Predicate::contains_any(&[
                    "result",
                    "marksheet",
                    "supply",
                    "supplementary",
                    "rt ",
                    "rv ",
                    "rrv",
                ]),
                RESULTS,
            ),
            RuleEntry::new(
                "time_table",
                Predicate::contains_any(&[
                    "time table",
                    "timetable",
                    "exam time table",
                    "datesheet",
                    "date sheet",
                    "exam date",
                    "exam schedule",
                ]),
                TIME_TABLE,
            ),
            RuleEntry::new(
                "academic_calendar",
                Any(vec![
                    Contains("academic calendar"),
                    All(vec![Contains("calendar"), Contains("academic")]),
                    Contains("semester calendar"),
                    Contains("holiday list"),
                ]),
                ACADEMIC_CALENDAR,
            ),
            RuleEntry::new(
                "exam_form",
                Predicate::contains_any(&[
                    "exam form",
                    "examination form",
                    "online exam form",
                    "exam registration",
                ]),
                EXAM_FORM,
            ),
            RuleEntry::new(
                "notices",
                Predicate::contains_any(&[
                    "notice",
                    "notices",
                    "latest notice",
                    "corrigendum",
                    "advertisement",
                    "vacancy",
                ]),
                NOTICES,
            ),
            RuleEntry::new(
                "tenders",
                Predicate::contains_any(&["tender", "tenders", "e-tender"]),
                TENDERS,
            ),
            RuleEntry::new(
                "newsletter",
                Predicate::contains_any(&["newsletter", "pravah"]),
                NEWSLETTER,
            ),
            RuleEntry::new("seniority_list", Contains("seniority list"), SENIORITY_LIST),
            RuleEntry::new("merit_list", Contains("merit list"), MERIT_LIST),
            RuleEntry::new(
                "csdie",
                Predicate::contains_any(&["csdie", "skill development", "skill centre"]),
                CSDIE,
            ),
            RuleEntry::new(
                "utd",
                Predicate::contains_any(&["utd", "university teaching department"]),
                UTD,
            ),
            RuleEntry::new(
                "placement",
                Predicate::contains_any(&["cpc", "placement", "training and placement"]),
                PLACEMENT,
            ),
            RuleEntry::new(
                "grievance",
                Predicate::contains_any(&["grievance", "complaint", "ragging", "problem"]),
                GRIEVANCE,
            ),
            RuleEntry::new(
                "contact",
                All(vec![
                    Predicate::contains_any(&["contact", "helpline", "phone", "email"]),
                    Predicate::contains_any(&["csvtu", "university"]),
                ]),
                CONTACT,
            ),
            RuleEntry::new(
                "ordinances",
                Predicate::contains_any(&["ordinance", "ordinances"]),
                ORDINANCES,
            ),
            RuleEntry::new(
                "schemes",
                Predicate::contains_any(&[
                    "scheme",
                    "schemes",
                    "syllabus",
                    "curriculum",
                    "programs and schemes",
                ]),
                SCHEMES,
            ),
            RuleEntry::new(
                "official_website",
                Predicate::contains_any(&["official website", "official site", "csvtu website"]),
                OFFICIAL_WEBSITE,
            ),
            RuleEntry::new(
                "about",
                Predicate::contains_any(&["about csvtu", "about university", "csvtu information"]),
                ABOUT,
            ),
            RuleEntry::new(
                "journals",
                Predicate::contains_any(&["csvtu journal", "csvtu journals", "research journal"]),
                JOURNALS,
            ),
            RuleEntry::new("mous", Predicate::contains_any(&["mou", "mous"]), MOUS),
            RuleEntry::new(
                "phd",
                All(vec![
                    Contains("phd"),
                    Predicate::contains_any(&["information", "admission", "notice"]),
                ]),
                PHD,
            ),
        ])
    }
}

const VICE_CHANCELLOR: &str = "
Vice-Chancellor of CSVTU ✅

Dr. Arun Arora  
Vice-Chancellor  
Chhattisgarh Swami Vivekanand Technical University, Bhilai (C.G.)

Official Profile:
https://csvtu.ac.in/ew/honble-vice-chancellor/
";

const DIGIVARSITY: &str = "
CSVTU Digivarsity – Student Portal (Official)

You can use this portal for:
• Exam forms  
• Student login  
• Admission / enrollment details  
• Password reset  
• Ph.D application  

Official Link:  
https://csvtu.digivarsity.online/CSVTU/index.aspx
";

const E_LIBRARY: &str = "
CSVTU E-Library (Official) 📚

• Online resources and e-books  
• E-Library login and related notices are available on this page  

Direct official link:
https://csvtu.ac.in/ew/e-library/
";

const RESULTS: &str = "
CSVTU Results Page (Official)

• RT / RV / RRV / Regular / Supplementary results  
• You can check results using your roll number  

👉 https://csvtu.ac.in/ew/results-rtrvrrv/
";

const TIME_TABLE: &str = "
CSVTU Examination Time Table (Official)

• Time tables for BE, B.Tech, Diploma, M.Tech, MBA, MCA, Pharmacy, etc.  
• Click on the course name (blue bar) to view semester-wise time tables  

👉 https://csvtu.ac.in/ew/examination-time-table/
";

const ACADEMIC_CALENDAR: &str = "
CSVTU Academic Calendar (Official)

• Semester-wise academic calendar  
• Holidays, exam periods, session dates  

👉 https://csvtu.ac.in/ew/academic-calendar/
";

const EXAM_FORM: &str = "
CSVTU Online Examination Form (Official)

• Online exam form filling for students  
• Institute login and help manual are also available on this page  

👉 https://csvtu.ac.in/ew/examination-form-2016/
";

const NOTICES: &str = "
CSVTU Notices (Official)

• Latest university notices  
• Exam, recruitment, corrigendum and other updates  

👉 https://csvtu.ac.in/ew/notices/
";

const TENDERS: &str = "
CSVTU Tenders (Official)

• Active university tenders  
• Tender documents and last dates  

👉 https://csvtu.ac.in/ew/tenders/
";

const NEWSLETTER: &str = "
CSVTU Newsletter – \"Pravah\" (Official)

👉 https://csvtu.ac.in/ew/newsletter/
";

const SENIORITY_LIST: &str = "
CSVTU Seniority List (Teaching / Non-Teaching)

👉 https://csvtu.ac.in/ew/seniority-list/
";

const MERIT_LIST: &str = "
CSVTU Merit List (Different sessions and courses)

👉 https://csvtu.ac.in/ew/merit-list/
";

const CSDIE: &str = "
Centre for Skill Development and Informal Education (CSDIE) – CSVTU

👉 https://csvtu.ac.in/ew/centre-for-skill-development-and-informal-education-csdie/
";

const UTD: &str = "
CSVTU University Teaching Department (UTD) – Main Page

👉 https://csvtu.ac.in/ew/university-teaching-department/
";

const PLACEMENT: &str = "
CSVTU Centralized Placement Cell (CPC)

👉 https://csvtu.ac.in/ew/centralized-placement-cell-cpc/
";

const GRIEVANCE: &str = "
CSVTU Grievance Cell – Online Complaint Portal

👉 https://csvtu.ac.in/ew/grievance-cell/
";

const CONTACT: &str = "
CSVTU Official Contact Details 📞

👉 https://csvtu.ac.in/ew/contact-us/
";

const ORDINANCES: &str = "
CSVTU Ordinances & Amendments (Rules and Regulations)

👉 https://csvtu.ac.in/ew/the-university/ordinances/
";

const SCHEMES: &str = "
CSVTU \"Programs and Schemes\" (Scheme and Syllabus)

👉 https://csvtu.ac.in/ew/programs-and-schemes/

From here you can open scheme and syllabus PDFs for Diploma, B.Tech, M.Tech, MBA,
Pharmacy and other programmes.
";

const OFFICIAL_WEBSITE: &str = "
CSVTU Official Website ✅

https://csvtu.ac.in
";

const ABOUT: &str = "
About CSVTU (Chhattisgarh Swami Vivekanand Technical University)

• State Government Technical University of Chhattisgarh  
• Main campus at Newai, Bhilai (District Durg)  
• Fields: Engineering, Technology, Architecture, Pharmacy, Management, MCA and Diploma  
• Many Engineering / Diploma / Pharmacy / MBA / MCA / M.Tech colleges are affiliated to CSVTU  
• UTD Bhilai runs B.Tech (Honours), M.Tech / M.Plan and Diploma programmes.
";

const JOURNALS: &str = "
CSVTU Journals (Official Research Journals Portal)

👉 https://csvtujournal.in
";

const MOUS: &str = "
CSVTU Memorandum of Understanding (MoUs)

👉 https://csvtu.ac.in/ew/memorandum-of-understanding-mous/
";

const PHD: &str = "
CSVTU Ph.D Information – Official Page

👉 https://csvtu.ac.in/ew/research/phd-information/
";
