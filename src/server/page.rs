//! Fallback chat page served for any non-API route. Self-contained so the
//! proxy binary needs no asset directory; the Dioxus app is the full client.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>moodchat</title>
<style>
  * { margin: 0; padding: 0; box-sizing: border-box; }
  body {
    background: #1b1b1b;
    color: #e6e6e6;
    font-family: monospace;
    height: 100vh;
    display: flex;
    flex-direction: column;
    padding: 1rem;
  }
  header { display: flex; justify-content: space-between; margin-bottom: 0.75rem; }
  #chat {
    flex: 1;
    overflow-y: auto;
    border: 1px solid #3a3a3a;
    padding: 0.75rem;
  }
  .message { margin-bottom: 0.6rem; white-space: pre-wrap; }
  .user-message { color: #9ecbff; }
  .bot-message { color: #789922; }
  form { display: flex; gap: 0.5rem; margin-top: 0.75rem; }
  input[type=text] {
    flex: 1;
    background: #111;
    color: #e6e6e6;
    border: 1px solid #3a3a3a;
    padding: 0.5rem;
    font-family: inherit;
  }
  button { padding: 0.5rem 1rem; cursor: pointer; }
</style>
</head>
<body>
<header>
  <strong>moodchat</strong>
  <label><input type="checkbox" id="angry"> angry mode</label>
</header>
<div id="chat"></div>
<form id="composer">
  <input type="text" id="message" autocomplete="off" autofocus>
  <button type="submit" id="send">Send</button>
</form>
<script>
  const chat = document.getElementById('chat');
  const input = document.getElementById('message');
  const send = document.getElementById('send');
  const angry = document.getElementById('angry');

  function append(sender, text) {
    const div = document.createElement('div');
    div.className = 'message ' + sender + '-message';
    div.textContent = text;
    chat.appendChild(div);
    chat.scrollTop = chat.scrollHeight;
  }

  append('bot', "Hello! I'm your dual-personality chatbot. Toggle the switch to change between nice and angry mode!");

  document.getElementById('composer').addEventListener('submit', async (ev) => {
    ev.preventDefault();
    const message = input.value.trim();
    if (!message) return;
    append('user', message);
    input.value = '';
    input.disabled = true;
    send.disabled = true;
    try {
      const res = await fetch('/api/chat', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ message, isAngryMode: angry.checked })
      });
      const data = await res.json();
      append('bot', data.response ?? ('Error: ' + data.error));
    } catch (err) {
      append('bot', 'Error processing your request. Please try again.');
    } finally {
      input.disabled = false;
      send.disabled = false;
      input.focus();
    }
  });
</script>
</body>
</html>
"#;
