//! Prompt templates for the three workflow stages.
//!
//! Each stage formats one instruction string that is sent verbatim to the
//! model. The numbered sub-requirements bias the model toward a consistent
//! structure; nothing on this side enforces the shape of the reply.

/// Build the project-analysis prompt from a raw project description.
pub fn analyze_project(description: &str) -> String {
    format!(
        r"Analyze the following project description and break it down into:
1. Main objectives
2. Key features
3. Technical requirements
4. Estimated timeline
5. Required skills

Project Description: {description}"
    )
}

/// Build the task-generation prompt from a prior project analysis.
pub fn create_tasks(analysis: &str) -> String {
    format!(
        r"Based on this project analysis, create a detailed list of tasks with:
1. Task name
2. Description
3. Required skills
4. Estimated duration
5. Dependencies

Project Analysis: {analysis}"
    )
}

/// Build the assignment-matching prompt from generated tasks and the
/// serialized roster.
///
/// `roster_json` is the full roster as pretty-printed JSON so the model can
/// see every member's skills, experience, role, and availability.
pub fn match_tasks_to_team(tasks: &str, roster_json: &str) -> String {
    format!(
        r"Match the following tasks to team members based on their skills and experience.
Format your response as follows:

## Task Assignments

### [Team Member Name]
- Task: [Task Name]
- Reason: [Why this team member is suitable for this task]
- Required Skills: [Skills needed]
- Estimated Time: [Time estimate]

### [Next Team Member Name]
...

Consider:
1. Skill match
2. Experience level
3. Current workload
4. Task dependencies
5. Team collaboration

Available Team Members and their details:
{roster_json}

Tasks to be assigned:
{tasks}"
    )
}
